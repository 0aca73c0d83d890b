#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Absent and not-owned records both map here, so callers cannot probe
    /// for the existence of another user's data.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl CoreError {
    /// Shorthand for a field-level validation failure.
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        CoreError::InvalidField {
            field,
            message: message.into(),
        }
    }
}
