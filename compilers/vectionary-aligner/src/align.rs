use thiserror::Error;
use tracing::{debug, warn};
use vectionary_parser::{tokenize, word_runs_between, OffsetMap, RawWord, TokenizeMode};
use vectionary_protocol::{
    lemma_of, strip_punctuation, AnnotatedSentence, Category, DefinitionLink, ExternalSpan, Origin,
    Span, Token,
};
use vectionary_tagger::Classifier;

use crate::config::GapFill;

/// A remote span the aligner could not use as given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentIssue {
    #[error("span {text:?} starts at char {char_index}, past the end of the text ({char_len} chars); dropped")]
    OutOfBounds { text: String, char_index: usize, char_len: usize },

    #[error("span {text:?} at char {char_index} runs past the end of the text; clamped")]
    Clamped { text: String, char_index: usize },

    #[error("span {text:?} at char {char_index} overlaps an earlier span; dropped")]
    Overlap { text: String, char_index: usize },

    #[error("span at char {char_index} has no text; dropped")]
    Empty { char_index: usize },
}

/// Output of one alignment: the sentence plus every span that had to be
/// dropped or clamped on the way.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analysis {
    pub sentence: AnnotatedSentence,
    pub issues: Vec<AlignmentIssue>,
}

/// Merges sparse remote spans back onto the submitted text.
pub struct Aligner<'a> {
    classifier: &'a Classifier,
    gap_fill: GapFill,
}

impl<'a> Aligner<'a> {
    pub fn new(classifier: &'a Classifier, gap_fill: GapFill) -> Self {
        Self { classifier, gap_fill }
    }

    /// Reconstructs a complete, ordered token sequence from `spans`.
    ///
    /// Spans are sorted by `char_index`; the word runs between them are filled
    /// locally. Empty `spans` means no remote result at all, so the whole text
    /// goes through the offline classifier instead.
    pub fn align(&self, text: &str, spans: &[ExternalSpan]) -> Analysis {
        if spans.is_empty() {
            return Analysis { sentence: self.fallback(text), issues: Vec::new() };
        }

        let map = OffsetMap::new(text);
        let mut ordered: Vec<&ExternalSpan> = spans.iter().collect();
        ordered.sort_by_key(|span| span.char_index);

        let mut tokens: Vec<Token> = Vec::with_capacity(spans.len());
        let mut issues = Vec::new();
        let mut processed = 0;

        for span in ordered {
            let Some(placed) = place(span, &map, &mut issues) else {
                continue;
            };

            if placed.start < processed {
                warn!(text = %span.text, char_index = span.char_index, "overlapping span dropped");
                issues.push(AlignmentIssue::Overlap { text: span.text.clone(), char_index: span.char_index });
                continue;
            }

            self.fill_gap(text, &map, Span::new(processed, placed.start), &mut tokens);
            tokens.push(external_token(text, &map, span, placed));
            processed = placed.end;
        }
        self.fill_gap(text, &map, Span::new(processed, text.len()), &mut tokens);

        if self.gap_fill == GapFill::Classify {
            self.fix_gap_bigrams(&mut tokens);
        }

        debug!(tokens = tokens.len(), spans = spans.len(), issues = issues.len(), "aligned sentence");
        Analysis { sentence: AnnotatedSentence::new(text, tokens), issues }
    }

    /// Whitespace tokenization plus the rule-based classifier over the whole text.
    pub fn fallback(&self, text: &str) -> AnnotatedSentence {
        let map = OffsetMap::new(text);
        let words = tokenize(text, TokenizeMode::Whitespace);
        let raw: Vec<&str> = words.iter().map(|w| w.text).collect();
        let categories = self.classifier.classify_words(&raw);

        let tokens = words
            .iter()
            .zip(categories)
            .map(|(word, category)| local_token(&map, word, category, Origin::Fallback))
            .collect();
        AnnotatedSentence::new(text, tokens)
    }

    fn fill_gap(&self, text: &str, map: &OffsetMap, gap: Span, tokens: &mut Vec<Token>) {
        if gap.is_empty() {
            return;
        }
        for word in word_runs_between(text, gap) {
            let category = match self.gap_fill {
                GapFill::Unknown => Category::Unknown,
                GapFill::Classify => {
                    let previous = tokens.last().map(|t| t.text.as_str());
                    self.classifier.classify(word.text, tokens.len(), previous)
                }
            };
            tokens.push(local_token(map, &word, category, Origin::GapFill));
        }
    }

    fn fix_gap_bigrams(&self, tokens: &mut [Token]) {
        for i in 1..tokens.len() {
            let (head, tail) = tokens.split_at_mut(i);
            let (first, second) = (&mut head[i - 1], &mut tail[0]);
            if first.origin == Origin::GapFill
                && second.origin == Origin::GapFill
                && self
                    .classifier
                    .is_bigram(strip_punctuation(&first.text), strip_punctuation(&second.text))
            {
                first.category = Category::ProperNoun;
                second.category = Category::ProperNoun;
            }
        }
    }
}

/// Byte span a remote span covers, after bounds checks.
fn place(span: &ExternalSpan, map: &OffsetMap, issues: &mut Vec<AlignmentIssue>) -> Option<Span> {
    let char_count = span.text.chars().count();
    if char_count == 0 {
        warn!(char_index = span.char_index, "empty span dropped");
        issues.push(AlignmentIssue::Empty { char_index: span.char_index });
        return None;
    }

    let char_len = map.char_len();
    if span.char_index >= char_len {
        warn!(text = %span.text, char_index = span.char_index, char_len, "out-of-bounds span dropped");
        issues.push(AlignmentIssue::OutOfBounds {
            text: span.text.clone(),
            char_index: span.char_index,
            char_len,
        });
        return None;
    }

    let mut char_end = span.char_index + char_count;
    if char_end > char_len {
        warn!(text = %span.text, char_index = span.char_index, "span clamped to end of text");
        issues.push(AlignmentIssue::Clamped { text: span.text.clone(), char_index: span.char_index });
        char_end = char_len;
    }

    let start = map.byte_of(span.char_index)?;
    let end = map.byte_of(char_end)?;
    Some(Span::new(start, end))
}

fn external_token(text: &str, map: &OffsetMap, span: &ExternalSpan, placed: Span) -> Token {
    let surface = &text[placed.start..placed.end];
    if surface != span.text {
        debug!(expected = %span.text, found = surface, "span text differs from input; keeping input");
    }

    Token {
        text: surface.to_string(),
        span: placed,
        char_span: map.char_span(placed),
        lemma: span.lemma.clone().unwrap_or_else(|| lemma_of(surface)),
        category: span.category,
        origin: Origin::External,
        definition: span.definition.clone(),
        definition_link: DefinitionLink::Unavailable,
        gloss: span.gloss.clone(),
        element_id: span.element_id.clone(),
    }
}

fn local_token(map: &OffsetMap, word: &RawWord<'_>, category: Category, origin: Origin) -> Token {
    Token {
        text: word.text.to_string(),
        span: word.span,
        char_span: map.char_span(word.span),
        lemma: lemma_of(word.text),
        category,
        origin,
        definition: None,
        definition_link: DefinitionLink::Unavailable,
        gloss: None,
        element_id: None,
    }
}
