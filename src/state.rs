//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;

/// Services shared by all requests.
///
/// Cloning is cheap: every field is an [`Arc`]. The storage handle is passed
/// in explicitly, so tests can swap the backend.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
}

impl AppState {
    /// Wires the services on top of a storage backend.
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        let link_service = Arc::new(LinkService::new(link_repository));
        let redirect_service = Arc::new(RedirectService::new(link_service.clone()));

        Self {
            link_service,
            redirect_service,
        }
    }
}
