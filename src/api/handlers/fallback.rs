//! Handler for unmatched routes.

use serde_json::json;

use crate::error::AppError;

/// Returns a JSON 404 for any path no route claims (e.g. `/a/b/c`).
pub async fn fallback_handler() -> AppError {
    AppError::not_found("Not found", json!({}))
}
