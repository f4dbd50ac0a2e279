//! REST error mapping.
//!
//! Every failure is rendered as `{"message": ...}` with a status derived from
//! the domain error kind. Infrastructure details are logged, never returned.

use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use tracing::error;

use super::dto::ErrorBody;
use crate::domain::error::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

/// An HTTP status with a client-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let status = match &e {
            DomainError::Validation { .. }
            | DomainError::InvalidImage { .. }
            | DomainError::InvalidCredentials => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Duplicate { .. } => StatusCode::CONFLICT,
            DomainError::Database { .. }
            | DomainError::ImageStorage { .. }
            | DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match e {
            DomainError::Validation { field, message } => format!("{field}: {message}"),
            DomainError::InvalidImage { reason } | DomainError::Unauthorized { reason } => reason,
            e if e.is_infrastructure() => {
                error!(error = %e, "Request failed on an infrastructure error");
                "internal server error".to_owned()
            }
            e => e.to_string(),
        };

        Self { status, message }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_message() {
        let e = ApiError::from(DomainError::validation("name", "must not be empty"));
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "name: must not be empty");

        let e = ApiError::from(DomainError::not_found("company", 3));
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.message, "company not found");

        let e = ApiError::from(DomainError::duplicate("brand"));
        assert_eq!(e.status, StatusCode::CONFLICT);

        let e = ApiError::from(DomainError::invalid_credentials());
        assert_eq!(e.status, StatusCode::BAD_REQUEST);

        let e = ApiError::from(DomainError::unauthorized("Missing or malformed JWT"));
        assert_eq!(e.status, StatusCode::UNAUTHORIZED);
        assert_eq!(e.message, "Missing or malformed JWT");
    }

    #[test]
    fn infrastructure_errors_are_masked() {
        for err in [
            DomainError::database("relation \"companies\" does not exist"),
            DomainError::image_storage("cloudinary returned 500"),
            DomainError::internal("join error"),
        ] {
            let e = ApiError::from(err);
            assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(e.message, "internal server error");
        }
    }
}
