//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for short links.
///
/// The storage layer is the source of truth for code uniqueness and for
/// click accounting; services must not emulate either with a read followed
/// by a write.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Persists a new link with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already stored.
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code (exact, case-sensitive match).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Returns every link, newest first (`created_at DESC`, ties by `id DESC`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Atomically adds one click and sets `last_clicked_time` to now.
    ///
    /// Returns `Ok(false)` if no link has this code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError>;

    /// Permanently removes a link.
    ///
    /// Returns `Ok(false)` if no link has this code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Counts stored links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sums `total_clicks` over all links.
    async fn total_clicks(&self) -> Result<i64, AppError>;
}
