use rkyv::AlignedVec;
use tracing::{debug, warn};
use vectionary_protocol::{Lexicon, MAX_LABEL_LEN};

use crate::error::TaggerError;

/// English word lists shipped with the crate.
const ENGLISH_LEXICON: &str = include_str!("../data/lexicon.json");

pub fn parse_json(json: &str) -> Result<Lexicon, TaggerError> {
    let lexicon: Lexicon = serde_json::from_str(json)?;
    debug!(
        version = lexicon.version.0,
        words = lexicon.word_count(),
        bigrams = lexicon.bigrams.len(),
        "parsed lexicon"
    );
    warn_unmatchable_aliases(&lexicon);
    Ok(lexicon)
}

/// The embedded English lexicon.
pub fn english() -> Result<Lexicon, TaggerError> {
    parse_json(ENGLISH_LEXICON)
}

/// Serializes a lexicon into the rkyv binary consumed by [`from_archive`].
pub fn compile(lexicon: &Lexicon) -> Result<AlignedVec, TaggerError> {
    rkyv::to_bytes::<_, 1024>(lexicon).map_err(|e| TaggerError::Serialize(e.to_string()))
}

/// Validates and loads a compiled lexicon.
///
/// The bytes are copied into an aligned buffer first: files read from disk or
/// fetched by the browser carry no alignment guarantee.
pub fn from_archive(bytes: &[u8]) -> Result<Lexicon, TaggerError> {
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    let lexicon = rkyv::from_bytes::<Lexicon>(&aligned)
        .map_err(|e| TaggerError::Archive(e.to_string()))?;
    debug!(version = lexicon.version.0, words = lexicon.word_count(), "loaded compiled lexicon");
    warn_unmatchable_aliases(&lexicon);
    Ok(lexicon)
}

/// Aliases that can never match are kept but reported; the count is returned.
fn warn_unmatchable_aliases(lexicon: &Lexicon) -> usize {
    let mut unmatchable = 0;
    for alias in lexicon.tag_aliases.iter().filter(|alias| !alias.is_matchable()) {
        warn!(
            label = %alias.label,
            max_len = MAX_LABEL_LEN,
            "tag alias is not ASCII or too long; it will never match"
        );
        unmatchable += 1;
    }
    unmatchable
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatchable_aliases_are_counted() {
        let json = format!(
            r#"{{
                "version": 4,
                "function_words": [], "verbs": [], "adjectives": [], "adverbs": [], "proper_nouns": [],
                "tag_aliases": [
                    {{ "label": "NN", "category": "NOUN" }},
                    {{ "label": "{}", "category": "NOUN" }},
                    {{ "label": "nom propre", "category": "PROPER_NOUN" }},
                    {{ "label": "名詞", "category": "NOUN" }}
                ]
            }}"#,
            "L".repeat(MAX_LABEL_LEN + 4)
        );
        let lexicon = parse_json(&json).unwrap();
        assert_eq!(lexicon.tag_aliases.len(), 4);
        assert_eq!(warn_unmatchable_aliases(&lexicon), 2);
        assert_eq!(lexicon.category_for_label("NOM PROPRE"), vectionary_protocol::Category::ProperNoun);
    }
}
