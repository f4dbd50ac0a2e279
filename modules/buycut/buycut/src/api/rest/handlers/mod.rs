//! REST handlers.
//!
//! Handlers are thin: parse input, call a domain service, wrap the result in
//! the response envelope.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};
use buycut_sdk::{DEFAULT_PAGE_SIZE, PageRequest};

use super::dto::PageQuery;
use super::error::ApiError;

mod brands;
mod companies;
mod feed;
mod users;

pub use brands::*;
pub use companies::*;
pub use feed::*;
pub use users::*;

/// `Path` with rejections rendered as `{"message"}` 400s.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `Json` with rejections rendered as `{"message"}` 400s.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Multipart` with rejections rendered as `{"message"}` 400s.
pub struct ApiMultipart(pub Multipart);

impl<S> FromRequest<S> for ApiMultipart
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Multipart::from_request(req, state)
            .await
            .map(Self)
            .map_err(ApiError::from)
    }
}

/// Lenient page selection: anything unparseable falls back to the default.
fn page_request(query: &PageQuery) -> PageRequest {
    fn parse(raw: Option<&str>, default: i64) -> i64 {
        raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
    }

    PageRequest {
        page: parse(query.page.as_deref(), 1),
        limit: parse(query.limit.as_deref(), DEFAULT_PAGE_SIZE),
    }
}
