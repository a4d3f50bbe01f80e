pub mod offsets;
pub mod parser;

use vectionary_protocol::Span;

use crate::parser::{chunk, scan_with_spans, word_run};

pub use offsets::OffsetMap;

/// How raw text is cut into words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeMode {
    /// Whitespace-delimited chunks with punctuation attached ("fox.").
    /// Feeds the offline classifier.
    Whitespace,
    /// Word-character runs with internal apostrophes ("fox", "don't").
    /// Fills holes between remote spans.
    WordRuns,
}

/// A word cut from the input, with its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawWord<'a> {
    pub text: &'a str,
    pub span: Span,
}

/// Primary entry point: Text -> ordered words with exact offsets.
/// Empty and whitespace-only input yields no words.
pub fn tokenize(input: &str, mode: TokenizeMode) -> Vec<RawWord<'_>> {
    let spans = match mode {
        TokenizeMode::Whitespace => scan_with_spans(input, chunk),
        TokenizeMode::WordRuns => scan_with_spans(input, word_run),
    };
    spans
        .into_iter()
        .map(|(span, text)| RawWord { text, span })
        .collect()
}

/// Word runs inside `input[range]`, with spans relative to the whole input.
pub fn word_runs_between(input: &str, range: Span) -> Vec<RawWord<'_>> {
    let Some(slice) = input.get(range.start..range.end) else {
        return Vec::new();
    };
    tokenize(slice, TokenizeMode::WordRuns)
        .into_iter()
        .map(|w| RawWord { text: w.text, span: w.span.shifted(range.start) })
        .collect()
}
