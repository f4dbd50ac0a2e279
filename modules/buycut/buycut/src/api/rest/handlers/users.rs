use std::sync::Arc;

use axum::{Extension, Json};
use http::StatusCode;
use tracing::field::Empty;

use super::ApiJson;
use crate::api::rest::dto::{
    Envelope, ErrorBody, LoginDto, LoginRequest, RegisterRequest, UserDto,
};
use crate::api::rest::error::ApiResult;
use crate::domain::service::AppServices;

#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, body = Envelope<UserDto>),
        (status = 400, body = ErrorBody),
        (status = 409, body = ErrorBody),
    )
)]
#[tracing::instrument(skip(svc, req), fields(user.email = %req.email, request_id = Empty))]
pub async fn register(
    Extension(svc): Extension<Arc<AppServices>>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<UserDto>>)> {
    let user = svc.users.register(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("User registered", UserDto::from(user))),
    ))
}

/// Exchange e-mail and password for an access token.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, body = Envelope<LoginDto>),
        (status = 400, body = ErrorBody),
    )
)]
#[tracing::instrument(skip(svc, req), fields(user.email = %req.email, request_id = Empty))]
pub async fn login(
    Extension(svc): Extension<Arc<AppServices>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<Envelope<LoginDto>>> {
    let grant = svc.users.login(&req.email, &req.password).await?;
    Ok(Json(Envelope::new("Login successful", LoginDto::from(grant))))
}
