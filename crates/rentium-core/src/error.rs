use thiserror::Error;

#[derive(Debug, Error)]
pub enum RentiumError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RentiumError {
    fn from(e: serde_json::Error) -> Self {
        RentiumError::SerializationError(e.to_string())
    }
}
