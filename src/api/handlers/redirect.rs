//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Responds with `302 Found` and a `Location` header. The visit is counted
/// before the stored target is checked, so a link with a broken target still
/// accumulates clicks while returning 500.
///
/// # Errors
///
/// Returns 404 Not Found for reserved paths and unknown codes.
/// Returns 500 if the stored target has no http(s) scheme or cannot be sent
/// as a `Location` header.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.redirect_service.resolve(&code).await?;

    let location =
        HeaderValue::try_from(target.url.as_str()).map_err(|_| AppError::InvalidTarget {
            code: target.code.clone(),
            target_url: target.url.clone(),
        })?;

    Ok((target.status, [(header::LOCATION, location)]))
}
