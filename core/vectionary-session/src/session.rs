use std::sync::Arc;

use tracing::{debug, info, warn};
use vectionary_aligner::{Analysis, Analyzer};
use vectionary_protocol::{ExternalSpan, SubmissionId};

use crate::config::{FailurePolicy, SubmissionConfig};
use crate::error::{RemoteServiceError, SubmissionError};
use crate::remote::parse_response;

/// One accepted sentence, tagged with the id its response must echo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: SubmissionId,
    pub text: String,
}

/// What the presentation layer should show right now.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Idle,
    /// Waiting for the remote service.
    Pending { submission: Submission },
    Ready { submission: Submission, analysis: Arc<Analysis> },
    /// The request failed. `previous` is the last good result when the
    /// failure policy retains it.
    Failed {
        submission: Submission,
        error: RemoteServiceError,
        previous: Option<Arc<Analysis>>,
    },
}

/// Result of handing a response to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer submission was made after this one; the response was discarded.
    Stale { id: SubmissionId, latest: Option<SubmissionId> },
    /// The submission was already settled; the response was discarded.
    Duplicate { id: SubmissionId },
}

/// Latest-submission-wins state for one input box.
///
/// Every accepted submission gets a fresh id; only a response carrying the
/// latest id may change the view.
pub struct Session {
    analyzer: Analyzer,
    config: SubmissionConfig,
    next_id: SubmissionId,
    latest: Option<Submission>,
    last_success: Option<Arc<Analysis>>,
    view: View,
}

impl Session {
    pub fn new(analyzer: Analyzer, config: SubmissionConfig) -> Self {
        Self {
            analyzer,
            config,
            next_id: SubmissionId::new(1),
            latest: None,
            last_success: None,
            view: View::Idle,
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn latest(&self) -> Option<&Submission> {
        self.latest.as_ref()
    }

    /// Checks the input box contents without submitting.
    pub fn validate(&self, text: &str) -> Result<(), SubmissionError> {
        if text.trim().is_empty() {
            return Err(SubmissionError::Empty);
        }
        let len = text.chars().count();
        if len > self.config.max_chars {
            return Err(SubmissionError::TooLong { len, max: self.config.max_chars });
        }
        Ok(())
    }

    /// Accepts a sentence for remote classification. The caller sends the
    /// request and later reports back through [`Session::complete`].
    pub fn submit(&mut self, text: &str) -> Result<Submission, SubmissionError> {
        let submission = self.issue(text)?;
        self.view = View::Pending { submission: submission.clone() };
        Ok(submission)
    }

    /// Accepts a sentence and tags it with the rule-based classifier only.
    pub fn submit_offline(&mut self, text: &str) -> Result<Submission, SubmissionError> {
        let submission = self.issue(text)?;
        let analysis = Arc::new(self.analyzer.analyze(&submission.text, &[]));
        self.last_success = Some(Arc::clone(&analysis));
        self.view = View::Ready { submission: submission.clone(), analysis };
        Ok(submission)
    }

    /// Applies the outcome of the request made for submission `id`.
    pub fn complete(
        &mut self,
        id: SubmissionId,
        response: Result<Vec<ExternalSpan>, RemoteServiceError>,
    ) -> Completion {
        let submission = match self.pending(id) {
            Ok(submission) => submission.clone(),
            Err(ignored) => return ignored,
        };

        match response {
            Ok(spans) => {
                let analysis = Arc::new(self.analyzer.analyze(&submission.text, &spans));
                for issue in &analysis.issues {
                    debug!(id = id.0, %issue, "alignment issue");
                }
                info!(id = id.0, tokens = analysis.sentence.tokens.len(), "submission analyzed");
                self.last_success = Some(Arc::clone(&analysis));
                self.view = View::Ready { submission, analysis };
            }
            Err(error) => {
                warn!(id = id.0, %error, "remote classification failed");
                let previous = match self.config.failure_policy {
                    FailurePolicy::RetainPrevious => self.last_success.clone(),
                    FailurePolicy::Clear => {
                        self.last_success = None;
                        None
                    }
                };
                self.view = View::Failed { submission, error, previous };
            }
        }
        Completion::Applied
    }

    /// Applies a raw HTTP outcome: status check, then payload normalization.
    pub fn complete_raw(&mut self, id: SubmissionId, status: u16, body: &str) -> Completion {
        let text = match self.pending(id) {
            Ok(submission) => submission.text.clone(),
            Err(ignored) => return ignored,
        };

        let response = if (200..300).contains(&status) {
            parse_response(&text, body, self.analyzer.classifier())
        } else {
            Err(RemoteServiceError::Status(status))
        };
        self.complete(id, response)
    }

    /// Reports a transport failure (no HTTP response at all).
    pub fn fail(&mut self, id: SubmissionId, message: impl Into<String>) -> Completion {
        self.complete(id, Err(RemoteServiceError::Network(message.into())))
    }

    fn issue(&mut self, text: &str) -> Result<Submission, SubmissionError> {
        self.validate(text)?;
        let submission = Submission { id: self.next_id, text: text.to_string() };
        self.next_id = self.next_id.next();
        self.latest = Some(submission.clone());
        debug!(id = submission.id.0, "submission accepted");
        Ok(submission)
    }

    fn pending(&self, id: SubmissionId) -> Result<&Submission, Completion> {
        let latest = self.latest.as_ref().map(|s| s.id);
        if latest != Some(id) {
            warn!(id = id.0, latest = ?latest.map(|l| l.0), "stale response discarded");
            return Err(Completion::Stale { id, latest });
        }
        match &self.view {
            View::Pending { submission } if submission.id == id => Ok(submission),
            _ => Err(Completion::Duplicate { id }),
        }
    }
}
