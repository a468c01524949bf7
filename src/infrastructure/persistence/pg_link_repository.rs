//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str =
    "id, short_code, target_url, total_clicks, last_clicked_time, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    short_code: String,
    target_url: String,
    total_clicks: i64,
    last_clicked_time: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.short_code,
            r.target_url,
            r.total_clicks,
            r.last_clicked_time,
            r.created_at,
            r.updated_at,
        )
    }
}

/// PostgreSQL repository for link storage and click accounting.
///
/// Code uniqueness is enforced by the `links_short_code_key` constraint; an
/// insert that loses a race surfaces as [`AppError::Conflict`] through the
/// `From<sqlx::Error>` conversion.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO links (short_code, target_url)
            VALUES ($1, $2)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.short_code)
        .bind(&new_link.target_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn increment_clicks(&self, code: &str) -> Result<bool, AppError> {
        // Single statement: the row lock serialises concurrent clicks.
        let result = sqlx::query(
            r#"
            UPDATE links
            SET total_clicks = total_clicks + 1,
                last_clicked_time = NOW(),
                updated_at = NOW()
            WHERE short_code = $1
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn total_clicks(&self) -> Result<i64, AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(total_clicks), 0)::BIGINT FROM links")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(total)
    }
}
