use rkyv::{Archive, Deserialize, Serialize};
use crate::category::{normalize_label, Category, MAX_LABEL_LEN};
use crate::ids::LexiconVersion;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Two adjacent words that together always name a proper noun ("Central Park").
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ProperBigram {
    pub first: String,
    pub second: String,
}

/// Maps a remote tag label onto the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct TagAlias {
    pub label: String,
    pub category: Category,
}

impl TagAlias {
    /// False for labels no remote tag can ever match (non-ASCII or longer
    /// than [`MAX_LABEL_LEN`]).
    pub fn is_matchable(&self) -> bool {
        normalize_label(&self.label, &mut [0u8; MAX_LABEL_LEN]).is_some()
    }
}

/// Word-list data source for the rule-based classifier.
///
/// Class lists are matched lowercase; `proper_nouns` and `bigrams` are
/// case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: LexiconVersion,
    pub function_words: Vec<String>,
    pub verbs: Vec<String>,
    pub adjectives: Vec<String>,
    pub adverbs: Vec<String>,
    pub proper_nouns: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bigrams: Vec<ProperBigram>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tag_aliases: Vec<TagAlias>,
}

impl Lexicon {
    pub fn word_count(&self) -> usize {
        self.function_words.len()
            + self.verbs.len()
            + self.adjectives.len()
            + self.adverbs.len()
            + self.proper_nouns.len()
    }

    /// Resolves a remote tag label: lexicon aliases first, then the built-in
    /// taxonomy. Unrecognized labels become `Unknown`.
    pub fn category_for_label(&self, label: &str) -> Category {
        let mut wanted = [0u8; MAX_LABEL_LEN];
        let mut candidate = [0u8; MAX_LABEL_LEN];
        if let Some(key) = normalize_label(label, &mut wanted) {
            for alias in &self.tag_aliases {
                if normalize_label(&alias.label, &mut candidate) == Some(key) {
                    return alias.category;
                }
            }
        }
        Category::from_label(label).unwrap_or(Category::Unknown)
    }
}
