//! In-process implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Link storage kept in process memory.
///
/// Mirrors the PostgreSQL semantics: duplicate codes are rejected inside the
/// write lock (the equivalent of the unique index) and click increments are
/// applied inside a single write-lock critical section. Data is lost on restart.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: RwLock<HashMap<String, Link>>,
    next_id: AtomicI64,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.write().await;

        if links.contains_key(&new_link.short_code) {
            return Err(AppError::conflict(
                "Short code already exists. Please choose a different code.",
                json!({ "constraint": "links_short_code_key" }),
            ));
        }

        let now = Utc::now();
        let link = Link::new(
            self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            new_link.short_code,
            new_link.target_url,
            0,
            None,
            now,
            now,
        );

        links.insert(link.short_code.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.read().await.get(code).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self.links.read().await.values().cloned().collect();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(links)
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        let mut links = self.links.write().await;

        let Some(link) = links.get_mut(code) else {
            return Ok(false);
        };

        let now = Utc::now();
        link.total_clicks += 1;
        link.last_clicked_time = Some(now);
        link.updated_at = now;

        Ok(true)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.write().await.remove(code).is_some())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.read().await.len() as i64)
    }

    async fn total_clicks(&self) -> Result<i64, AppError> {
        Ok(self
            .links
            .read()
            .await
            .values()
            .map(|link| link.total_clicks)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_link(code: &str, url: &str) -> NewLink {
        NewLink {
            short_code: code.to_string(),
            target_url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_zero_clicks() {
        let repo = MemoryLinkRepository::new();

        let first = repo
            .create(new_link("first01", "https://a.example.com"))
            .await
            .unwrap();
        let second = repo
            .create(new_link("second1", "https://b.example.com"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.total_clicks, 0);
        assert!(first.last_clicked_time.is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let repo = MemoryLinkRepository::new();
        repo.create(new_link("dup1234", "https://a.example.com"))
            .await
            .unwrap();

        let result = repo.create(new_link("dup1234", "https://b.example.com")).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        let stored = repo.find_by_code("dup1234").await.unwrap().unwrap();
        assert_eq!(stored.target_url, "https://a.example.com");
    }

    #[tokio::test]
    async fn test_find_is_case_sensitive() {
        let repo = MemoryLinkRepository::new();
        repo.create(new_link("AbCdEf1", "https://example.com"))
            .await
            .unwrap();

        assert!(repo.find_by_code("AbCdEf1").await.unwrap().is_some());
        assert!(repo.find_by_code("abcdef1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let repo = MemoryLinkRepository::new();
        for code in ["older01", "middle1", "newest1"] {
            repo.create(new_link(code, "https://example.com"))
                .await
                .unwrap();
        }

        let codes: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.short_code)
            .collect();

        assert_eq!(codes, vec!["newest1", "middle1", "older01"]);
    }

    #[tokio::test]
    async fn test_increment_unknown_code() {
        let repo = MemoryLinkRepository::new();
        assert!(!repo.increment_clicks("missing").await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        let repo = Arc::new(MemoryLinkRepository::new());
        repo.create(new_link("hot1234", "https://example.com"))
            .await
            .unwrap();
        let started = Utc::now();

        let tasks: Vec<_> = (0..200)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.increment_clicks("hot1234").await })
            })
            .collect();

        for task in tasks {
            assert!(task.await.unwrap().unwrap());
        }

        let link = repo.find_by_code("hot1234").await.unwrap().unwrap();
        assert_eq!(link.total_clicks, 200);
        assert!(link.last_clicked_time.unwrap() >= started);
        assert_eq!(repo.total_clicks().await.unwrap(), 200);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = MemoryLinkRepository::new();
        repo.create(new_link("gone123", "https://example.com"))
            .await
            .unwrap();

        assert!(repo.delete("gone123").await.unwrap());
        assert!(!repo.delete("gone123").await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
