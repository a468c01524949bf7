//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on the HTTP or infrastructure layers.
//! Business logic lives in [`crate::application::services`]; concrete storage
//! lives in [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
