use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::error::ApiError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Shared-secret gate for every data-bearing route. Runs before the handler,
/// so a rejected request never reaches the store.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(msg) = check_api_key(request.headers(), state.config.api_key.as_deref()) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "rejected request: {}",
            msg
        );
        return Err(ApiError::unauthorized("Unauthorized"));
    }

    Ok(next.run(request).await)
}

/// Plain equality against the configured secret. No secret configured means
/// nothing is accepted.
fn check_api_key(headers: &HeaderMap, expected: Option<&str>) -> Result<(), &'static str> {
    let expected = expected.ok_or("API key not configured")?;

    let provided = headers
        .get(API_KEY_HEADER)
        .ok_or("missing X-API-KEY header")?
        .to_str()
        .map_err(|_| "X-API-KEY header is not valid text")?;

    if provided == expected {
        Ok(())
    } else {
        Err("invalid API key")
    }
}
