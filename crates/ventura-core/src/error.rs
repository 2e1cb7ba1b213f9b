use thiserror::Error;

#[derive(Debug, Error)]
pub enum VenturaError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid date: {field}: {reason}")]
    InvalidDate { field: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for VenturaError {
    fn from(e: serde_json::Error) -> Self {
        VenturaError::Serialization(e.to_string())
    }
}
