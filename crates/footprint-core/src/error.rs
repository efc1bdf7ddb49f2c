use thiserror::Error;

#[derive(Debug, Error)]
pub enum FootprintError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("No emission factor found for activity type '{activity_type}' with unit '{unit}'")]
    FactorNotFound {
        activity_type: String,
        unit: String,
    },

    #[error("Calculation not found: {0}")]
    CalculationNotFound(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FootprintError {
    fn from(e: serde_json::Error) -> Self {
        FootprintError::SerializationError(e.to_string())
    }
}
