use thiserror::Error;

/// Why a submission was refused. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Please enter some text to analyze.")]
    Empty,

    #[error("Text is {len} characters long; the limit is {max}.")]
    TooLong { len: usize, max: usize },
}

/// Failure reported by the remote classification service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteServiceError {
    #[error("Failed to process text: HTTP error! Status: {0}")]
    Status(u16),

    #[error("Failed to process text: {0}")]
    Network(String),

    #[error("Failed to process text: unreadable response ({0})")]
    Payload(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("engine config is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("submission.max_chars must be at least 1")]
    ZeroLimit,
}
