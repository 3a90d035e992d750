use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrowthError {
    /// A required request field is missing or out of range. Nothing was computed.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The injected record store failed.
    #[error("Repository error: {0}")]
    Repository(String),

    /// A computed value left the finite range.
    #[error("Computation error: {0}")]
    Computation(String),
}

impl GrowthError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        GrowthError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn repository(err: impl std::fmt::Display) -> Self {
        GrowthError::Repository(err.to_string())
    }

    /// Stable tag for the error class, used in response envelopes.
    pub fn kind(&self) -> &'static str {
        match self {
            GrowthError::Validation { .. } => "validation",
            GrowthError::Repository(_) => "repository",
            GrowthError::Computation(_) => "computation",
        }
    }
}

pub type GrowthResult<T> = Result<T, GrowthError>;
