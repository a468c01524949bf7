//! Business logic services for the application layer.

pub mod link_service;
pub mod redirect_service;

pub use link_service::{LinkService, LinkSummary, MAX_ALLOCATION_ATTEMPTS};
pub use redirect_service::{RESERVED_PATHS, RedirectService, RedirectTarget, is_reserved_path};
