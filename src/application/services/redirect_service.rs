//! Redirect resolution with click accounting.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tracing::{error, warn};

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_validator::has_redirectable_scheme;

/// Path segments claimed by other routes; never resolved as short codes.
pub const RESERVED_PATHS: &[&str] = &["api", "stats", "healthz", "favicon.ico"];

/// Returns true if `path` matches a reserved segment, ignoring ASCII case.
pub fn is_reserved_path(path: &str) -> bool {
    RESERVED_PATHS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(path))
}

/// Where a short code sends the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub code: String,
    pub url: String,
    pub status: StatusCode,
}

/// Resolves short codes to redirect targets and counts the visit.
pub struct RedirectService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    link_service: Arc<LinkService<L>>,
}

impl<L: LinkRepository + ?Sized> RedirectService<L> {
    /// Creates a new redirect service on top of the link registry.
    pub fn new(link_service: Arc<LinkService<L>>) -> Self {
        Self { link_service }
    }

    /// Resolves `code` to a `302 Found` target.
    ///
    /// # Resolution Steps
    ///
    /// 1. Reserved paths are rejected without a storage lookup
    /// 2. The link is looked up by code
    /// 3. The click is recorded before the target is checked; a failure to
    ///    record is logged and does not block the redirect
    /// 4. The stored target must start with `http://` or `https://`
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for reserved paths and unknown codes.
    /// Returns [`AppError::InvalidTarget`] if the stored URL lacks a scheme
    /// (the click is still counted).
    /// Returns [`AppError::StorageUnavailable`] if the lookup fails.
    pub async fn resolve(&self, code: &str) -> Result<RedirectTarget, AppError> {
        if is_reserved_path(code) {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "code": code }),
            ));
        }

        let link = self.link_service.get_link(code).await?;

        if let Err(e) = self.link_service.record_click(code).await {
            warn!(code, error = %e, "Failed to record click, redirecting anyway");
        }

        let target = link.target_url.trim();

        if !has_redirectable_scheme(target) {
            error!(
                code,
                id = link.id,
                target_url = %link.target_url,
                "Stored target URL has no http(s) scheme"
            );
            return Err(AppError::InvalidTarget {
                code: code.to_string(),
                target_url: target.to_string(),
            });
        }

        Ok(RedirectTarget {
            code: link.short_code,
            url: target.to_string(),
            status: StatusCode::FOUND,
        })
    }
}
