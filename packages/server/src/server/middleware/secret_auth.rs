use axum::{
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

/// Header carrying the static shared secret for privileged endpoints.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared-secret authentication middleware
///
/// Compares the `x-api-key` header exactly against the configured secret.
/// Requests without a matching secret are rejected with 401 before reaching
/// the handler.
pub async fn secret_auth_middleware(
    api_secret: String,
    request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if !has_valid_secret(&request, &api_secret) {
        debug!("Rejected request with missing or invalid shared secret");
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    next.run(request).await
}

fn has_valid_secret(request: &axum::http::Request<axum::body::Body>, api_secret: &str) -> bool {
    request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == api_secret)
        .unwrap_or(false)
}
