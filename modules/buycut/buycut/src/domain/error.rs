use buycut_sdk::BuycutError;
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{resource} not found")]
    NotFound { resource: &'static str, key: String },

    #[error("{resource} already exists")]
    Duplicate { resource: &'static str },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid image: {reason}")]
    InvalidImage { reason: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Image storage error: {message}")]
    ImageStorage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(resource: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            resource,
            key: key.to_string(),
        }
    }

    #[must_use]
    pub fn duplicate(resource: &'static str) -> Self {
        Self::Duplicate { resource }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn image_storage(message: impl Into<String>) -> Self {
        Self::ImageStorage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error comes from a collaborator rather than the caller's input.
    #[must_use]
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Database { .. } | Self::ImageStorage { .. } | Self::Internal { .. }
        )
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for BuycutError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::NotFound { resource, .. } => BuycutError::not_found(resource),
            DomainError::Duplicate { resource } => {
                BuycutError::conflict(format!("{resource} already exists"))
            }
            DomainError::Validation { field, message } => {
                BuycutError::validation(format!("{field}: {message}"))
            }
            DomainError::InvalidImage { reason } => BuycutError::validation(reason),
            DomainError::InvalidCredentials | DomainError::Unauthorized { .. } => {
                BuycutError::InvalidCredentials
            }
            DomainError::Database { .. }
            | DomainError::ImageStorage { .. }
            | DomainError::Internal { .. } => BuycutError::internal(),
        }
    }
}
