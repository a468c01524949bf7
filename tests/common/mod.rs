#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use tinylink::domain::entities::{Link, NewLink};
use tinylink::domain::repositories::LinkRepository;
use tinylink::infrastructure::persistence::MemoryLinkRepository;
use tinylink::routes::router;
use tinylink::state::AppState;

pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let state = AppState::new(repo.clone());

    (state, repo)
}

pub fn create_test_server() -> (TestServer, Arc<MemoryLinkRepository>) {
    let (state, repo) = create_test_state();
    let server = TestServer::new(router(state)).unwrap();

    (server, repo)
}

/// Inserts a link directly, bypassing URL validation.
pub async fn create_test_link(repo: &MemoryLinkRepository, code: &str, url: &str) -> Link {
    repo.create(NewLink {
        short_code: code.to_string(),
        target_url: url.to_string(),
    })
    .await
    .unwrap()
}
