//! Public error types for the buycut module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

/// Errors that can be returned by the `BuycutClient`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuycutError {
    /// The requested resource does not exist.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// A unique value is already taken.
    #[error("{message}")]
    Conflict { message: String },

    /// Validation error with the provided data.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Login failed.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl BuycutError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
