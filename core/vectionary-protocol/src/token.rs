use alloc::string::String;
use alloc::vec::Vec;
use alloc::format;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::category::Category;

/// Half-open range `[start, end)` into the submitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn shifted(self, by: usize) -> Self {
        Self::new(self.start + by, self.end + by)
    }
}

/// Where a token's category came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Origin {
    /// Supplied by the remote classification service.
    External,
    /// A word the remote service skipped, filled in locally.
    GapFill,
    /// Produced by the offline rule-based classifier.
    Fallback,
}

/// Resolved dictionary link for a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "href", rename_all = "snake_case"))]
pub enum DefinitionLink {
    Link(String),
    #[default]
    Unavailable,
}

impl DefinitionLink {
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            DefinitionLink::Link(uri) => Some(uri),
            DefinitionLink::Unavailable => None,
        }
    }
}

/// One annotated word of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Token {
    /// Exact substring of the input, punctuation included.
    pub text: String,
    /// Byte range into the input.
    pub span: Span,
    /// Unicode scalar range into the input.
    pub char_span: Span,
    pub lemma: String,
    pub category: Category,
    pub origin: Origin,
    /// Link supplied by the classification result, if any (sentinel not yet filtered).
    pub definition: Option<String>,
    /// Link handed to the presentation layer.
    pub definition_link: DefinitionLink,
    /// Definition text supplied by the remote service.
    pub gloss: Option<String>,
    /// Remote element identifier (`ID` / `definition.ID`).
    pub element_id: Option<String>,
}

impl Token {
    /// Card label shown above the definition.
    pub fn display_id(&self) -> String {
        match (&self.element_id, self.category) {
            (Some(id), _) => id.clone(),
            (None, Category::ProperNoun) => format!("{}_{}", self.text, self.category.label()),
            (None, category) => format!("{}_{}_1.1", self.text, category.label()),
        }
    }
}

/// Externally tagged span, normalized from the remote service payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct ExternalSpan {
    pub text: String,
    /// Offset in Unicode scalar values.
    pub char_index: usize,
    pub category: Category,
    pub definition: Option<String>,
    pub lemma: Option<String>,
    pub gloss: Option<String>,
    pub element_id: Option<String>,
}

impl ExternalSpan {
    pub fn new(text: impl Into<String>, char_index: usize, category: Category) -> Self {
        Self {
            text: text.into(),
            char_index,
            category,
            definition: None,
            lemma: None,
            gloss: None,
            element_id: None,
        }
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }
}

/// A piece of the original sentence, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Untagged text between tokens (spaces, punctuation).
    Gap(&'a str),
    Token(&'a Token),
}

/// Ordered annotation of one submitted sentence.
///
/// Tokens are strictly increasing and never overlap; the text between them is
/// recovered from offsets, never synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct AnnotatedSentence {
    pub text: String,
    pub tokens: Vec<Token>,
}

impl AnnotatedSentence {
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self { text: text.into(), tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn segments(&self) -> Segments<'_> {
        Segments { sentence: self, cursor: 0, next_token: 0 }
    }

    /// Rebuilds the input from tokens and the gaps between them.
    pub fn reconstruct(&self) -> String {
        let mut out = String::with_capacity(self.text.len());
        for segment in self.segments() {
            match segment {
                Segment::Gap(gap) => out.push_str(gap),
                Segment::Token(token) => out.push_str(&token.text),
            }
        }
        out
    }
}

pub struct Segments<'a> {
    sentence: &'a AnnotatedSentence,
    cursor: usize,
    next_token: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.sentence.text.as_str();
        match self.sentence.tokens.get(self.next_token) {
            Some(token) if token.span.start > self.cursor => {
                let gap = text.get(self.cursor..token.span.start)?;
                self.cursor = token.span.start;
                Some(Segment::Gap(gap))
            }
            Some(token) => {
                self.cursor = token.span.end;
                self.next_token += 1;
                Some(Segment::Token(token))
            }
            None if self.cursor < text.len() => {
                let gap = text.get(self.cursor..)?;
                self.cursor = text.len();
                Some(Segment::Gap(gap))
            }
            None => None,
        }
    }
}
