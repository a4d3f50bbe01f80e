//! Remote classification payloads, normalized into [`ExternalSpan`]s.
//!
//! The service has answered in two shapes over time: a flat list whose
//! `definition` is a link string, and a richer list whose `definition` is an
//! object (`ID`, `pos`, `definition`) with the link under `definition_link`.
//! Either may arrive bare or wrapped in `{ "data": [...] }`.

use serde::Deserialize;
use tracing::{debug, warn};
use vectionary_protocol::{Category, ExternalSpan};
use vectionary_tagger::Classifier;

use crate::error::RemoteServiceError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Words(Vec<RemoteWord>),
    Wrapped(Wrapper),
}

#[derive(Debug, Deserialize)]
struct Wrapper {
    #[serde(alias = "words")]
    data: Vec<RemoteWord>,
}

#[derive(Debug, Deserialize)]
struct RemoteWord {
    #[serde(rename = "ID", default)]
    id: Option<String>,
    text: String,
    #[serde(default)]
    lemma: Option<String>,
    #[serde(rename = "type", alias = "pos", default)]
    kind: Option<String>,
    #[serde(default)]
    char_index: Option<usize>,
    #[serde(default)]
    definition: Option<RemoteDefinition>,
    #[serde(default)]
    definition_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemoteDefinition {
    Link(String),
    Entry {
        #[serde(rename = "ID", default)]
        id: Option<String>,
        #[serde(default)]
        pos: Option<String>,
        #[serde(default)]
        definition: Option<String>,
    },
}

/// Parses a response body for `text` into spans ready for alignment.
///
/// Words without `char_index` are located by searching for their text after the
/// previous word, indexed or not; words that cannot be found are dropped.
pub fn parse_response(
    text: &str,
    body: &str,
    classifier: &Classifier,
) -> Result<Vec<ExternalSpan>, RemoteServiceError> {
    let payload: Payload =
        serde_json::from_str(body).map_err(|e| RemoteServiceError::Payload(e.to_string()))?;
    let words = match payload {
        Payload::Words(words) => words,
        Payload::Wrapped(wrapper) => wrapper.data,
    };

    let mut spans = Vec::with_capacity(words.len());
    let mut search_from = 0;
    for word in words {
        let char_index = match word.char_index {
            Some(index) => {
                if let Some(end) = end_of_indexed(text, index, &word.text) {
                    search_from = end;
                }
                index
            }
            None => match locate(text, &word.text, search_from) {
                Some((index, end)) => {
                    search_from = end;
                    index
                }
                None => {
                    warn!(text = %word.text, "remote word not found in submission; dropped");
                    continue;
                }
            },
        };
        spans.push(normalize(word, char_index, classifier));
    }

    debug!(spans = spans.len(), "normalized remote payload");
    Ok(spans)
}

fn normalize(word: RemoteWord, char_index: usize, classifier: &Classifier) -> ExternalSpan {
    let (link, entry_id, entry_pos, gloss) = match word.definition {
        Some(RemoteDefinition::Link(link)) => (Some(link), None, None, None),
        Some(RemoteDefinition::Entry { id, pos, definition }) => (None, id, pos, definition),
        None => (None, None, None, None),
    };

    let category = word
        .kind
        .as_deref()
        .or(entry_pos.as_deref())
        .map_or(Category::Unknown, |label| classifier.category_for_label(label));

    let element_id = if category == Category::ProperNoun { word.id } else { entry_id };

    ExternalSpan {
        text: word.text,
        char_index,
        category,
        definition: word.definition_link.or(link),
        lemma: word.lemma,
        gloss,
        element_id,
    }
}

/// End byte of a word placed at `char_index`, clamped to the text.
fn end_of_indexed(text: &str, char_index: usize, word: &str) -> Option<usize> {
    let (start, _) = text.char_indices().nth(char_index)?;
    let mut end = (start + word.len()).min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    Some(end)
}

/// Char index and end byte of `needle` in `text`, searching from byte `from`
/// first and then from the start.
fn locate(text: &str, needle: &str, from: usize) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    let start = text
        .get(from..)
        .and_then(|rest| rest.find(needle))
        .map(|offset| from + offset)
        .or_else(|| text.find(needle))?;
    Some((text[..start].chars().count(), start + needle.len()))
}
