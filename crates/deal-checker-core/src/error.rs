use thiserror::Error;

#[derive(Debug, Error)]
pub enum DealCheckerError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DealCheckerError {
    fn from(e: serde_json::Error) -> Self {
        DealCheckerError::SerializationError(e.to_string())
    }
}
