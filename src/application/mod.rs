//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::LinkRepository`] trait
//! and expose the operations used by HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link registry (create, lookup, list, clicks, delete)
//! - [`services::redirect_service::RedirectService`] - Short code resolution for redirects

pub mod services;
