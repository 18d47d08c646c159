//! Model construction and sampling errors.

use super::error_code::{self, RiskQuantErrorCode};

/// Errors raised by frequency models and the distributions they own.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// A construction parameter violates a range, peak, or shape invariant.
    /// No partially built model is ever returned alongside this.
    #[error("Invalid parameter {field}: {message}")]
    InvalidParameter { field: String, message: String },

    /// The underlying sampler rejected its input (e.g. a negative Poisson rate).
    #[error("Sampling failed: {message}")]
    Sampling { message: String },
}

impl ModelError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field name for `InvalidParameter`, `None` otherwise.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(field),
            Self::Sampling { .. } => None,
        }
    }
}

impl RiskQuantErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => error_code::MODEL_ERROR,
            Self::Sampling { .. } => error_code::SAMPLING_ERROR,
        }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
