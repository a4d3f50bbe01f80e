//! Plain serializable views handed to JavaScript.

use serde::Serialize;
use vectionary_aligner::Analysis;
use vectionary_protocol::{Segment, Token};
use vectionary_session::View;

/// The structured token sent back to JavaScript/React.
#[derive(Debug, Serialize)]
pub struct TokenView {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub lemma: String,
    pub category: &'static str,
    pub emphasized: bool,
    pub origin: &'static str,
    pub link: Option<String>,
    pub gloss: Option<String>,
    pub display_id: String,
}

impl From<&Token> for TokenView {
    fn from(t: &Token) -> Self {
        Self {
            text: t.text.clone(),
            start: t.char_span.start,
            end: t.char_span.end,
            lemma: t.lemma.clone(),
            category: t.category.label(),
            emphasized: t.category.is_emphasized(),
            origin: match t.origin {
                vectionary_protocol::Origin::External => "external",
                vectionary_protocol::Origin::GapFill => "gap_fill",
                vectionary_protocol::Origin::Fallback => "fallback",
            },
            link: t.definition_link.as_uri().map(str::to_string),
            gloss: t.gloss.clone(),
            display_id: t.display_id(),
        }
    }
}

/// Rendering unit: either untouched source text or a token.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PieceView {
    Text { text: String },
    Token(TokenView),
}

#[derive(Debug, Serialize)]
pub struct AnalysisView {
    pub text: String,
    pub pieces: Vec<PieceView>,
    pub issues: Vec<String>,
}

impl From<&Analysis> for AnalysisView {
    fn from(analysis: &Analysis) -> Self {
        let pieces = analysis
            .sentence
            .segments()
            .map(|segment| match segment {
                Segment::Gap(text) => PieceView::Text { text: text.to_string() },
                Segment::Token(token) => PieceView::Token(token.into()),
            })
            .collect();
        Self {
            text: analysis.sentence.text.clone(),
            pieces,
            issues: analysis.issues.iter().map(|i| i.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StateView {
    Idle,
    Pending { id: u32, text: String },
    Ready { id: u32, analysis: AnalysisView },
    Failed { id: u32, error: String, previous: Option<AnalysisView> },
}

impl From<&View> for StateView {
    fn from(view: &View) -> Self {
        match view {
            View::Idle => StateView::Idle,
            View::Pending { submission } => StateView::Pending {
                id: submission.id.0,
                text: submission.text.clone(),
            },
            View::Ready { submission, analysis } => StateView::Ready {
                id: submission.id.0,
                analysis: analysis.as_ref().into(),
            },
            View::Failed { submission, error, previous } => StateView::Failed {
                id: submission.id.0,
                error: error.to_string(),
                previous: previous.as_deref().map(AnalysisView::from),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectionary_session::{EngineConfig, Session};
    use vectionary_tagger::Classifier;

    #[test]
    fn test_pieces_keep_original_spacing() {
        let mut session = Session::with_config(Classifier::english().unwrap(), EngineConfig::default());
        session.submit_offline("Hi  there, Anna!").unwrap();

        let StateView::Ready { analysis, .. } = StateView::from(session.view()) else {
            panic!("Expected Ready state");
        };
        let rebuilt: String = analysis
            .pieces
            .iter()
            .map(|p| match p {
                PieceView::Text { text } => text.as_str(),
                PieceView::Token(t) => t.text.as_str(),
            })
            .collect();
        assert_eq!(rebuilt, "Hi  there, Anna!");

        let anna = analysis
            .pieces
            .iter()
            .find_map(|p| match p {
                PieceView::Token(t) if t.text == "Anna!" => Some(t),
                _ => None,
            })
            .expect("Anna token");
        assert_eq!(anna.category, "PROPER NOUN");
        assert!(anna.emphasized);
        assert_eq!(anna.link.as_deref(), Some("https://en.wiktionary.org/wiki/Anna"));
    }
}
