//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, CreateLinkResponse, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "example.com/page",
///   "code": "promo25"
/// }
/// ```
///
/// `code` is optional; an empty string counts as absent.
///
/// # Response Codes
///
/// - **201 Created**: Link stored
/// - **400 Bad Request**: Malformed body, invalid URL or invalid code
/// - **409 Conflict**: Custom code already taken
/// - **500 Internal Server Error**: Code allocation exhausted or storage failure
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let url = payload.url.unwrap_or_default();

    let link = state
        .link_service
        .create_link(&url, payload.code.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists all links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns a single link with its click statistics.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link.into()))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Response Codes
///
/// - **204 No Content**: Link removed
/// - **404 Not Found**: Code unknown (including a second delete)
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
