use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("lexicon JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("compiled lexicon failed validation: {0}")]
    Archive(String),

    #[error("could not serialize lexicon: {0}")]
    Serialize(String),
}
