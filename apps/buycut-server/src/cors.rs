use http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tracing::warn;

/// Local frontend origin, always allowed.
pub const DEV_ORIGIN: &str = "http://localhost:3000";

/// CORS for the web client: the dev origin plus `client_base_url`, with
/// credentials.
#[must_use]
pub fn build_cors_layer(client_base_url: Option<&str>) -> CorsLayer {
    let mut origins = vec![HeaderValue::from_static(DEV_ORIGIN)];
    if let Some(url) = client_base_url.map(str::trim).filter(|u| !u.is_empty()) {
        match HeaderValue::from_str(url.trim_end_matches('/')) {
            Ok(origin) => origins.push(origin),
            Err(e) => warn!(error = %e, url, "Ignoring invalid server.client_base_url"),
        }
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::HEAD,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
