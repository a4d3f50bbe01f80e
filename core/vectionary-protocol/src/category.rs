use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// Part-of-speech tag attached to every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Category {
    Noun = 0,
    Verb = 1,
    Adjective = 2,
    Adverb = 3,
    ProperNoun = 4,
    /// Closed-list word (article, pronoun, preposition, ...). Never emphasized.
    Function = 5,
    /// Word nobody classified. Never emphasized.
    Unknown = 6,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Noun,
        Category::Verb,
        Category::Adjective,
        Category::Adverb,
        Category::ProperNoun,
        Category::Function,
        Category::Unknown,
    ];

    /// Display label used by the presentation layer.
    pub const fn label(self) -> &'static str {
        match self {
            Category::Noun => "NOUN",
            Category::Verb => "VERB",
            Category::Adjective => "ADJECTIVE",
            Category::Adverb => "ADVERB",
            Category::ProperNoun => "PROPER NOUN",
            Category::Function => "FUNCTION",
            Category::Unknown => "UNKNOWN",
        }
    }

    /// Whether the presentation layer renders this category as a highlighted link.
    pub const fn is_emphasized(self) -> bool {
        !matches!(self, Category::Function | Category::Unknown)
    }

    /// Resolves a tag label against the built-in taxonomy.
    ///
    /// Matching ignores case and treats spaces, hyphens and underscores alike,
    /// so `"PROPER NOUN"`, `"proper_noun"` and `"Proper-Noun"` are one label.
    /// Universal-dependency style labels (`ADJ`, `PROPN`, `DET`, ...) fold into
    /// the closest category.
    pub fn from_label(label: &str) -> Option<Category> {
        let mut buf = [0u8; MAX_LABEL_LEN];
        let key = normalize_label(label, &mut buf)?;

        let category = match key {
            "NOUN" => Category::Noun,
            "VERB" => Category::Verb,
            "ADJECTIVE" | "ADJ" => Category::Adjective,
            "ADVERB" | "ADV" => Category::Adverb,
            "PROPER_NOUN" | "PROPN" | "PROPERNOUN" => Category::ProperNoun,
            "FUNCTION" | "DET" | "PRT" | "ADP" | "PRON" | "CONJ" | "CCONJ" | "SCONJ" | "AUX"
            | "PART" | "PUNCT" | "X" | "NUM" | "INTJ" | "SYM" => Category::Function,
            "UNKNOWN" => Category::Unknown,
            _ => return None,
        };
        Some(category)
    }
}

/// Longest tag label (in bytes, after trimming) that can be matched.
pub const MAX_LABEL_LEN: usize = 32;

/// Uppercases ASCII labels into `buf`, mapping ' ' and '-' to '_'.
/// Returns `None` for labels longer than [`MAX_LABEL_LEN`] or not ASCII.
pub(crate) fn normalize_label<'b>(label: &str, buf: &'b mut [u8; MAX_LABEL_LEN]) -> Option<&'b str> {
    let label = label.trim();
    if label.len() > buf.len() || !label.is_ascii() {
        return None;
    }
    for (slot, byte) in buf.iter_mut().zip(label.bytes()) {
        *slot = match byte {
            b' ' | b'-' => b'_',
            other => other.to_ascii_uppercase(),
        };
    }
    core::str::from_utf8(&buf[..label.len()]).ok()
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

bitflags! {
    /// Closed lists a lexicon word belongs to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct WordClasses: u8 {
        const FUNCTION = 1;
        const VERB = 2;
        const ADJECTIVE = 4;
        const ADVERB = 8;
        const PROPER_NOUN = 16;
    }
}

impl WordClasses {
    /// First list hit in lookup priority order (function words win).
    /// Proper-noun membership is not considered here: it also depends on casing
    /// and sentence position.
    pub fn first_match(self) -> Option<Category> {
        if self.contains(WordClasses::FUNCTION) {
            Some(Category::Function)
        } else if self.contains(WordClasses::VERB) {
            Some(Category::Verb)
        } else if self.contains(WordClasses::ADJECTIVE) {
            Some(Category::Adjective)
        } else if self.contains(WordClasses::ADVERB) {
            Some(Category::Adverb)
        } else {
            None
        }
    }
}
