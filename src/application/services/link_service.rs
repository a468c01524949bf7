//! Link registry: creation, lookup, listing, click accounting and deletion.

use std::sync::Arc;

use crate::application::services::redirect_service::is_reserved_path;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_short_code, is_valid_short_code};
use crate::utils::url_validator::{is_valid_url, normalize_url};
use serde_json::json;
use tracing::{debug, info, warn};

/// Number of random candidates tried before giving up on allocation.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 10;

/// Aggregate counters across all links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSummary {
    pub links: i64,
    pub clicks: i64,
}

/// Service owning the short-code-to-URL mappings.
///
/// Validates and normalizes target URLs, allocates codes with bounded
/// collision retry and delegates uniqueness and click counting to the
/// injected [`LinkRepository`].
pub struct LinkService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Creates a short link for `target_url`.
    ///
    /// # Code Selection
    ///
    /// - If `custom_code` is provided, it must be 6-8 alphanumeric characters,
    ///   must not shadow a reserved path and must not be taken yet
    /// - Otherwise a random 7-character code is allocated, retrying up to
    ///   [`MAX_ALLOCATION_ATTEMPTS`] times on collision
    ///
    /// The stored URL always carries a scheme (`https://` is prepended when missing).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or the custom code is invalid.
    /// Returns [`AppError::Conflict`] if the custom code exists, or if storage
    /// reports a uniqueness violation on insert.
    /// Returns [`AppError::AllocationExhausted`] if every random candidate collided.
    pub async fn create_link(
        &self,
        target_url: &str,
        custom_code: Option<&str>,
    ) -> Result<Link, AppError> {
        if !is_valid_url(target_url) {
            return Err(AppError::bad_request(
                "Invalid URL. Please provide a valid URL.",
                json!({ "url": target_url }),
            ));
        }

        let target_url = normalize_url(target_url);

        let short_code = match custom_code {
            Some(custom) => {
                self.check_custom_code(custom).await?;
                custom.to_string()
            }
            None => self.allocate_code().await?,
        };

        let link = self
            .link_repository
            .create(NewLink {
                short_code,
                target_url,
            })
            .await?;

        info!(code = %link.short_code, id = link.id, "Short link created");

        Ok(link)
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| link_not_found(code))
    }

    /// Returns a snapshot of all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_all().await
    }

    /// Adds one click to the link and stamps `last_clicked_time`.
    ///
    /// The increment is a single storage operation, so concurrent clicks on
    /// the same code are never lost.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn record_click(&self, code: &str) -> Result<(), AppError> {
        if self.link_repository.increment_clicks(code).await? {
            debug!(code, "Click recorded");
            Ok(())
        } else {
            Err(link_not_found(code))
        }
    }

    /// Permanently deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if self.link_repository.delete(code).await? {
            info!(code, "Short link deleted");
            Ok(())
        } else {
            Err(link_not_found(code))
        }
    }

    /// Returns the number of links and the sum of their clicks.
    pub async fn summary(&self) -> Result<LinkSummary, AppError> {
        Ok(LinkSummary {
            links: self.link_repository.count().await?,
            clicks: self.link_repository.total_clicks().await?,
        })
    }

    async fn check_custom_code(&self, code: &str) -> Result<(), AppError> {
        if !is_valid_short_code(code) {
            return Err(AppError::bad_request(
                "Invalid short code. Code must be 6-8 alphanumeric characters.",
                json!({ "code": code }),
            ));
        }

        if is_reserved_path(code) {
            return Err(AppError::bad_request(
                "This code is reserved",
                json!({ "code": code }),
            ));
        }

        if self.link_repository.find_by_code(code).await?.is_some() {
            return Err(AppError::conflict(
                "Short code already exists. Please choose a different code.",
                json!({ "code": code }),
            ));
        }

        Ok(())
    }

    /// Picks a random code that is not stored yet.
    ///
    /// The existence probe is advisory: two concurrent allocations may pick the
    /// same free code, in which case the second insert fails with a conflict.
    async fn allocate_code(&self) -> Result<String, AppError> {
        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let code = generate_short_code(DEFAULT_CODE_LENGTH);

            if self.link_repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }

            warn!(code, attempt, "Generated short code collided");
        }

        Err(AppError::AllocationExhausted {
            attempts: MAX_ALLOCATION_ATTEMPTS,
        })
    }
}

fn link_not_found(code: &str) -> AppError {
    AppError::not_found("Link not found", json!({ "code": code }))
}
