use crate::validation::rules::Rejection;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] Rejection),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Malformed submission: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Parse(err.to_string())
    }
}
