//! Route table and `OpenAPI` document of the buycut REST API.

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::{Components, OpenApi as OpenApiDoc};
use utoipa::{Modify, OpenApi};

use super::auth::require_auth;
use super::dto::{
    BoycottedDto, BrandDto, CompanyDto, ErrorBody, KeywordMatchDto, KeywordRequest, LoginDto,
    LoginRequest, PageDto, RegisterRequest, UserDto,
};
use super::handlers;
use crate::domain::service::AppServices;
use crate::infra::auth::JwtTokens;

/// Prefix every API route is nested under.
pub const API_PREFIX: &str = "/api/v1";

#[derive(OpenApi)]
#[openapi(
    info(title = "Buycut API", description = "Consumer boycott registry"),
    paths(
        handlers::register,
        handlers::login,
        handlers::list_companies,
        handlers::get_company,
        handlers::create_company,
        handlers::update_company,
        handlers::delete_company,
        handlers::create_brand,
        handlers::update_brand,
        handlers::delete_brand,
        handlers::boycott_feed,
        handlers::search_by_keyword,
    ),
    components(schemas(
        ErrorBody,
        PageDto,
        CompanyDto,
        BrandDto,
        BoycottedDto,
        KeywordMatchDto,
        KeywordRequest,
        RegisterRequest,
        LoginRequest,
        UserDto,
        LoginDto,
    )),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        openapi
            .components
            .get_or_insert_with(Components::new)
            .add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
    }
}

/// Build the full router: `/health`, `/openapi.json` and the API under
/// [`API_PREFIX`]. Mutating routes require a bearer token.
#[must_use]
pub fn router(services: Arc<AppServices>, tokens: Arc<JwtTokens>) -> Router {
    let auth = from_fn_with_state(tokens, require_auth);

    let api = Router::new()
        .route("/users/register", post(handlers::register))
        .route("/users/login", post(handlers::login))
        .route(
            "/companies",
            get(handlers::list_companies).merge(
                post(handlers::create_company)
                    .put(handlers::update_company)
                    .route_layer(auth.clone()),
            ),
        )
        .route(
            "/companies/{id}",
            get(handlers::get_company)
                .merge(delete(handlers::delete_company).route_layer(auth.clone())),
        )
        .route(
            "/brands",
            post(handlers::create_brand).route_layer(auth.clone()),
        )
        .route("/brands/boycotted", post(handlers::boycott_feed))
        .route("/brands/search", post(handlers::search_by_keyword))
        .route(
            "/brands/{id}",
            put(handlers::update_brand)
                .delete(handlers::delete_brand)
                .route_layer(auth),
        );

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest(API_PREFIX, api)
        .layer(Extension(services))
}
