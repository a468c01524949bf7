//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::Link;
use crate::utils::code_generator::SHORT_CODE_REGEX;
use crate::utils::url_validator::is_valid_url;

/// Request body for `POST /api/links`.
///
/// ```json
/// { "url": "example.com/page", "code": "promo25" }
/// ```
///
/// A missing `url` is reported as an invalid URL by the service; an empty
/// `code` is treated as absent. When both fields are invalid the URL error
/// wins (see `From<ValidationErrors>` for [`crate::error::AppError`]).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Target URL, with or without scheme.
    #[serde(default)]
    #[validate(custom(function = "validate_target_url"))]
    pub url: Option<String>,

    /// Optional custom short code (6-8 alphanumeric characters).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(regex(
        path = "*SHORT_CODE_REGEX",
        message = "Code must be 6-8 alphanumeric characters"
    ))]
    pub code: Option<String>,
}

fn validate_target_url(url: &str) -> Result<(), ValidationError> {
    if is_valid_url(url) {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Response for a freshly created link (`201 Created`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub id: i64,
    pub short_code: String,
    pub target_url: String,
    pub total_clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for CreateLinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            short_code: link.short_code,
            target_url: link.target_url,
            total_clicks: link.total_clicks,
            created_at: link.created_at,
        }
    }
}

/// Full link representation used by the list and detail endpoints.
///
/// `lastClickedTime` is `null` until the first redirect.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub short_code: String,
    pub target_url: String,
    pub total_clicks: i64,
    pub last_clicked_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            short_code: link.short_code,
            target_url: link.target_url,
            total_clicks: link.total_clicks,
            last_clicked_time: link.last_clicked_time,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}
