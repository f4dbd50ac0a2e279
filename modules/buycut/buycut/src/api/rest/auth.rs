//! Bearer-token guard for mutating routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use buycut_sdk::UserId;
use http::{Method, header};

use super::error::ApiError;
use crate::domain::error::DomainError;
use crate::infra::auth::JwtTokens;

/// The authenticated caller, inserted into request extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: UserId,
}

/// Require `Authorization: Bearer <jwt>`; CORS preflights pass through.
///
/// # Errors
/// Returns 401 when the header is missing or malformed, or the token is invalid
/// or expired.
pub async fn require_auth(
    State(tokens): State<Arc<JwtTokens>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| DomainError::unauthorized("Missing or malformed JWT"))?;

    let id = tokens.verify(token)?;
    req.extensions_mut().insert(AuthUser { id });

    Ok(next.run(req).await)
}
