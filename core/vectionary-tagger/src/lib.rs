pub mod classifier;
pub mod error;
pub mod lexicon;

pub use classifier::Classifier;
pub use error::TaggerError;

impl Classifier {
    /// Classifier over the embedded English lexicon.
    pub fn english() -> Result<Self, TaggerError> {
        lexicon::english().map(Classifier::new)
    }

    pub fn from_json(json: &str) -> Result<Self, TaggerError> {
        lexicon::parse_json(json).map(Classifier::new)
    }

    pub fn from_archive(bytes: &[u8]) -> Result<Self, TaggerError> {
        lexicon::from_archive(bytes).map(Classifier::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vectionary_protocol::{Category, Lexicon, LexiconVersion, ProperBigram, WordClasses};

    fn english() -> Classifier {
        Classifier::english().expect("embedded lexicon must parse")
    }

    fn tags(classifier: &Classifier, sentence: &str) -> Vec<Category> {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        classifier.classify_words(&words)
    }

    #[test]
    fn test_quick_brown_fox() {
        let c = english();
        assert_eq!(
            tags(&c, "The quick brown fox"),
            vec![Category::Function, Category::Adjective, Category::Noun, Category::Noun]
        );
    }

    #[test]
    fn test_central_park_bigram() {
        let c = english();
        assert_eq!(
            tags(&c, "I love Central Park"),
            vec![Category::Function, Category::Verb, Category::ProperNoun, Category::ProperNoun]
        );
        // Single-word call: "Central" alone is still just an adjective
        assert_eq!(c.classify("Central", 2, Some("love")), Category::Adjective);
        assert_eq!(c.classify("Park.", 3, Some("Central")), Category::ProperNoun);
    }

    #[test]
    fn test_bigram_survives_punctuation() {
        let c = english();
        let got = tags(&c, "We walked through Central Park!");
        assert_eq!(got[3], Category::ProperNoun);
        assert_eq!(got[4], Category::ProperNoun);
    }

    #[test]
    fn test_capitalization_rule() {
        let c = english();
        // Sentence-initial capital needs list membership
        assert_eq!(c.classify("Zebras", 0, None), Category::Noun);
        assert_eq!(c.classify("Monday", 0, None), Category::ProperNoun);
        // Anywhere else, the capital alone is enough
        assert_eq!(c.classify("Zebras", 3, Some("saw")), Category::ProperNoun);
        // Lists win over capitalization
        assert_eq!(c.classify("The", 4, Some("and")), Category::Function);
    }

    #[test]
    fn test_list_priority_and_punctuation() {
        let c = english();
        // "then" sits in the function and adverb lists
        assert_eq!(c.word_classes("then"), WordClasses::FUNCTION | WordClasses::ADVERB);
        assert_eq!(c.classify("then,", 2, Some("and")), Category::Function);
        assert_eq!(c.classify("QUICKLY!", 1, Some("ran")), Category::Adverb);
        assert_eq!(c.classify("...", 1, Some("wait")), Category::Noun);
    }

    #[test]
    fn test_punctuation_only_word_defaults_to_noun() {
        let c = english();
        let categories = c.classify_words(&["Wait", "...", "what"]);
        assert_eq!(categories, vec![Category::Noun, Category::Noun, Category::Function]);
        assert_eq!(c.classify("?!", 0, None), Category::Noun);
    }

    #[test]
    fn test_configurable_bigrams() {
        let lexicon = Lexicon {
            version: LexiconVersion::new(2),
            function_words: vec!["in".to_string()],
            verbs: vec![],
            adjectives: vec!["new".to_string()],
            adverbs: vec![],
            proper_nouns: vec![],
            bigrams: vec![ProperBigram { first: "New".to_string(), second: "York".to_string() }],
            tag_aliases: vec![],
        };
        let c = Classifier::new(lexicon);
        assert_eq!(tags(&c, "New York"), vec![Category::ProperNoun, Category::ProperNoun]);
        assert_eq!(tags(&c, "new york"), vec![Category::Adjective, Category::Noun]);
    }

    #[test]
    fn test_archive_roundtrip_keeps_behavior() {
        let lexicon = lexicon::english().unwrap();
        let bytes = lexicon::compile(&lexicon).unwrap();

        // Unaligned copy, as a browser fetch would hand it over
        let mut shifted = vec![0u8];
        shifted.extend_from_slice(&bytes);
        let loaded = Classifier::from_archive(&shifted[1..]).unwrap();

        assert_eq!(loaded.lexicon(), &lexicon);
        assert_eq!(tags(&loaded, "I love Central Park"), tags(&english(), "I love Central Park"));
    }

    #[test]
    fn test_corrupt_archive_is_rejected() {
        assert!(matches!(
            Classifier::from_archive(&[1, 2, 3]),
            Err(TaggerError::Archive(_))
        ));
        assert!(matches!(Classifier::from_json("{"), Err(TaggerError::Json(_))));
    }

    #[test]
    fn test_remote_labels() {
        let c = english();
        assert_eq!(c.category_for_label("PROPER NOUN"), Category::ProperNoun);
        assert_eq!(c.category_for_label("ADV"), Category::Adverb);
        assert_eq!(c.category_for_label("pron"), Category::Function);
        assert_eq!(c.category_for_label("WHATEVER"), Category::Unknown);
    }

    proptest! {
        #[test]
        fn test_classify_is_deterministic(word in "\\PC{0,12}", position in 0usize..8, previous in proptest::option::of("[A-Za-z.,]{0,8}")) {
            let c = english();
            let first = c.classify(&word, position, previous.as_deref());
            let second = c.classify(&word, position, previous.as_deref());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_one_category_per_word(sentence in "[A-Za-z ,.!?]{0,60}") {
            let c = english();
            let words: Vec<&str> = sentence.split_whitespace().collect();
            prop_assert_eq!(c.classify_words(&words).len(), words.len());
        }
    }
}
