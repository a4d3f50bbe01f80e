pub mod config;
pub mod error;
pub mod remote;
pub mod session;

pub use config::{EngineConfig, FailurePolicy, SubmissionConfig};
pub use error::{ConfigError, RemoteServiceError, SubmissionError};
pub use remote::parse_response;
pub use session::{Completion, Session, Submission, View};

use vectionary_aligner::Analyzer;
use vectionary_tagger::Classifier;

impl Session {
    /// Builds a session from a classifier and a full engine config.
    pub fn with_config(classifier: Classifier, config: EngineConfig) -> Self {
        Session::new(Analyzer::new(classifier, config.analyzer), config.submission)
    }
}
