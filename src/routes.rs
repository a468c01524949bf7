//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /healthz`           - Liveness probe
//! - `/api/*`                    - Link management API (see [`crate::api::routes`])
//! - `GET    /{code}`            - Short link redirect (302)
//! - anything else               - 404 JSON
//!
//! Static routes take precedence over `/{code}`; reserved segments such as
//! `api` or `favicon.ico` that still reach the redirect handler are rejected
//! by [`crate::application::services::RedirectService`].
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{fallback_handler, health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router without path normalization.
///
/// Used directly by integration tests; production code goes through [`app_router`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/api", api::routes::link_routes())
        .route("/{code}", get(redirect_handler))
        .fallback(fallback_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
