use tracing::debug;
use vectionary_protocol::{AnnotatedSentence, ExternalSpan};
use vectionary_tagger::Classifier;

use crate::align::{Aligner, Analysis};
use crate::config::AnalyzerConfig;
use crate::resolve::LinkResolver;

/// The full pipeline: Text (+ remote spans) -> aligned tokens -> resolved links.
#[derive(Debug, Clone)]
pub struct Analyzer {
    classifier: Classifier,
    config: AnalyzerConfig,
    resolver: LinkResolver,
}

impl Analyzer {
    pub fn new(classifier: Classifier, config: AnalyzerConfig) -> Self {
        let resolver = LinkResolver::new(&config.dictionary_base_url, &config.definition_sentinel);
        Self { classifier, config, resolver }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn resolver(&self) -> &LinkResolver {
        &self.resolver
    }

    /// Aligns `spans` onto `text` and resolves every token's link.
    pub fn analyze(&self, text: &str, spans: &[ExternalSpan]) -> Analysis {
        debug!(chars = text.chars().count(), spans = spans.len(), "analyzing submission");
        let mut analysis = Aligner::new(&self.classifier, self.config.gap_fill).align(text, spans);
        self.resolve_links(&mut analysis.sentence);
        analysis
    }

    /// Offline mode: no remote result, rule-based tags only.
    pub fn analyze_offline(&self, text: &str) -> AnnotatedSentence {
        self.analyze(text, &[]).sentence
    }

    fn resolve_links(&self, sentence: &mut AnnotatedSentence) {
        for token in &mut sentence.tokens {
            token.definition_link = self.resolver.resolve(token);
        }
    }
}
