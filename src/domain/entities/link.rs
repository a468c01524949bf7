//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A short link with its click counters.
///
/// `id`, `short_code` and `created_at` never change after creation.
/// `total_clicks` only grows, through [`crate::domain::repositories::LinkRepository::increment_clicks`].
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub target_url: String,
    pub total_clicks: i64,
    pub last_clicked_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        short_code: String,
        target_url: String,
        total_clicks: i64,
        last_clicked_time: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_code,
            target_url,
            total_clicks,
            last_clicked_time,
            created_at,
            updated_at,
        }
    }
}

/// Input data for persisting a new link.
///
/// Click counters are not part of the input: storage always starts them at
/// zero clicks and no last click.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub short_code: String,
    pub target_url: String,
}
