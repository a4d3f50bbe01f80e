pub mod align;
pub mod analyzer;
pub mod config;
pub mod resolve;

pub use align::{Aligner, AlignmentIssue, Analysis};
pub use analyzer::Analyzer;
pub use config::{AnalyzerConfig, GapFill};
pub use resolve::LinkResolver;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vectionary_parser::{tokenize, TokenizeMode};
    use vectionary_protocol::{Category, DefinitionLink, ExternalSpan, Origin, Span};
    use vectionary_tagger::Classifier;

    fn analyzer() -> Analyzer {
        Analyzer::new(Classifier::english().unwrap(), AnalyzerConfig::default())
    }

    fn summary(analysis: &Analysis) -> Vec<(&str, Category)> {
        analysis.sentence.tokens.iter().map(|t| (t.text.as_str(), t.category)).collect()
    }

    #[test]
    fn test_offline_quick_brown_fox() {
        let sentence = analyzer().analyze_offline("The quick brown fox");
        let got: Vec<(&str, Category)> =
            sentence.tokens.iter().map(|t| (t.text.as_str(), t.category)).collect();
        assert_eq!(
            got,
            vec![
                ("The", Category::Function),
                ("quick", Category::Adjective),
                ("brown", Category::Noun),
                ("fox", Category::Noun),
            ]
        );
        assert!(sentence.tokens.iter().all(|t| t.origin == Origin::Fallback));
    }

    #[test]
    fn test_offline_central_park() {
        let analysis = analyzer().analyze("I love Central Park", &[]);
        assert_eq!(
            summary(&analysis),
            vec![
                ("I", Category::Function),
                ("love", Category::Verb),
                ("Central", Category::ProperNoun),
                ("Park", Category::ProperNoun),
            ]
        );
        assert_eq!(
            analysis.sentence.tokens[3].definition_link,
            DefinitionLink::Link("https://en.wiktionary.org/wiki/Park".to_string())
        );
    }

    #[test]
    fn test_offline_punctuation_chunk_is_a_noun_without_link() {
        let analysis = analyzer().analyze("Wait ... what", &[]);
        assert_eq!(
            summary(&analysis),
            vec![("Wait", Category::Noun), ("...", Category::Noun), ("what", Category::Function)]
        );
        assert_eq!(analysis.sentence.tokens[1].definition_link, DefinitionLink::Unavailable);
    }

    #[test]
    fn test_hello_world_gap_fill() {
        let spans = vec![ExternalSpan::new("world", 6, Category::Noun).with_definition("https://x/world")];
        let analysis = analyzer().analyze("Hello world", &spans);
        let tokens = &analysis.sentence.tokens;

        assert_eq!(summary(&analysis), vec![("Hello", Category::Unknown), ("world", Category::Noun)]);
        assert_eq!(tokens[0].origin, Origin::GapFill);
        assert_eq!(tokens[0].span, Span::new(0, 5));
        assert_eq!(
            tokens[0].definition_link,
            DefinitionLink::Link("https://en.wiktionary.org/wiki/Hello".to_string())
        );
        assert_eq!(tokens[1].origin, Origin::External);
        assert_eq!(tokens[1].definition_link, DefinitionLink::Link("https://x/world".to_string()));
        assert!(analysis.issues.is_empty());
    }

    #[test]
    fn test_out_of_order_and_multi_word_spans() {
        let text = "Yesterday we visited Central Park, then slept.";
        let spans = vec![
            ExternalSpan::new("slept", 40, Category::Verb),
            ExternalSpan::new("Central Park", 21, Category::ProperNoun),
            ExternalSpan::new("visited", 13, Category::Verb),
        ];
        let analysis = analyzer().analyze(text, &spans);

        assert_eq!(
            summary(&analysis),
            vec![
                ("Yesterday", Category::Unknown),
                ("we", Category::Unknown),
                ("visited", Category::Verb),
                ("Central Park", Category::ProperNoun),
                ("then", Category::Unknown),
                ("slept", Category::Verb),
            ]
        );
        assert_eq!(analysis.sentence.reconstruct(), text);
    }

    #[test]
    fn test_sentinel_definition_falls_back_to_dictionary() {
        let spans = vec![ExternalSpan::new("café", 4, Category::Noun).with_definition("TBD")];
        let analysis = analyzer().analyze("Une café!", &spans);
        let cafe = &analysis.sentence.tokens[1];

        assert_eq!(cafe.char_span, Span::new(4, 8));
        assert_eq!(cafe.span, Span::new(4, 9));
        assert_eq!(
            cafe.definition_link,
            DefinitionLink::Link("https://en.wiktionary.org/wiki/caf%C3%A9".to_string())
        );
    }

    #[test]
    fn test_inconsistent_spans_are_dropped_or_clamped() {
        let text = "red fox runs";
        let spans = vec![
            ExternalSpan::new("fox", 4, Category::Noun),
            ExternalSpan::new("ox", 5, Category::Noun),
            ExternalSpan::new("zebra", 99, Category::Noun),
            ExternalSpan::new("", 0, Category::Noun),
            ExternalSpan::new("runs far", 8, Category::Verb),
        ];
        let analysis = analyzer().analyze(text, &spans);

        assert_eq!(
            summary(&analysis),
            vec![("red", Category::Unknown), ("fox", Category::Noun), ("runs", Category::Verb)]
        );
        assert_eq!(analysis.issues.len(), 4);
        assert!(analysis.issues.contains(&AlignmentIssue::Overlap { text: "ox".to_string(), char_index: 5 }));
        assert!(analysis.issues.contains(&AlignmentIssue::Empty { char_index: 0 }));
        assert!(analysis
            .issues
            .contains(&AlignmentIssue::Clamped { text: "runs far".to_string(), char_index: 8 }));
        assert!(matches!(
            analysis.issues.iter().find(|i| matches!(i, AlignmentIssue::OutOfBounds { .. })),
            Some(AlignmentIssue::OutOfBounds { char_index: 99, char_len: 12, .. })
        ));
    }

    #[test]
    fn test_span_inside_a_word_clips_the_gap_word() {
        let analysis = analyzer().analyze("sunflower", &[ExternalSpan::new("flower", 3, Category::Noun)]);
        assert_eq!(summary(&analysis), vec![("sun", Category::Unknown), ("flower", Category::Noun)]);
    }

    #[test]
    fn test_classify_gap_fill() {
        let config = AnalyzerConfig { gap_fill: GapFill::Classify, ..AnalyzerConfig::default() };
        let analyzer = Analyzer::new(Classifier::english().unwrap(), config);
        let spans = vec![ExternalSpan::new("love", 2, Category::Verb)];
        let analysis = analyzer.analyze("I love Central Park", &spans);

        assert_eq!(
            summary(&analysis),
            vec![
                ("I", Category::Function),
                ("love", Category::Verb),
                ("Central", Category::ProperNoun),
                ("Park", Category::ProperNoun),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let a = analyzer();
        assert!(a.analyze("", &[]).sentence.is_empty());
        assert!(a.analyze("   ", &[]).sentence.is_empty());
        let analysis = a.analyze("", &[ExternalSpan::new("x", 0, Category::Noun)]);
        assert!(analysis.sentence.is_empty());
        assert_eq!(analysis.issues.len(), 1);
    }

    #[test]
    fn test_config_from_json() {
        let config: AnalyzerConfig = serde_json::from_str(r#"{ "gap_fill": "classify" }"#).unwrap();
        assert_eq!(config.gap_fill, GapFill::Classify);
        assert_eq!(config.definition_sentinel, "TBD");
    }

    proptest! {
        #[test]
        fn test_offline_reconstructs_input(text in "\\PC{0,60}") {
            let sentence = analyzer().analyze_offline(&text);
            prop_assert_eq!(sentence.reconstruct(), text.clone());
            for token in &sentence.tokens {
                prop_assert!(token.span.start < token.span.end);
                prop_assert_eq!(&text[token.span.start..token.span.end], token.text.as_str());
            }
        }

        #[test]
        fn test_every_word_run_appears_once(
            text in "[a-zA-Z' ,.!]{1,60}",
            mask in proptest::collection::vec(any::<bool>(), 30),
        ) {
            let runs = tokenize(&text, TokenizeMode::WordRuns);
            let mut spans: Vec<ExternalSpan> = runs
                .iter()
                .zip(mask.iter().cycle())
                .filter(|(_, keep)| **keep)
                .map(|(run, _)| ExternalSpan::new(run.text, run.span.start, Category::Noun))
                .collect();
            prop_assume!(!spans.is_empty());
            spans.reverse();

            let analysis = analyzer().analyze(&text, &spans);
            let got: Vec<&str> = analysis.sentence.tokens.iter().map(|t| t.text.as_str()).collect();
            let want: Vec<&str> = runs.iter().map(|r| r.text).collect();
            prop_assert_eq!(got, want);
            prop_assert!(analysis.issues.is_empty());
            prop_assert_eq!(analysis.sentence.reconstruct(), text.clone());
        }

        #[test]
        fn test_pipeline_is_idempotent(text in "[a-zA-Z ]{0,40}", index in 0usize..40) {
            let a = analyzer();
            let spans = vec![ExternalSpan::new("a", index, Category::Adverb)];
            prop_assert_eq!(a.analyze(&text, &spans), a.analyze(&text, &spans));
        }
    }
}
