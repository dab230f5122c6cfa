//! DTOs for bookmark endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::pagination::PaginationMeta;
use crate::domain::entities::Bookmark;

/// Body of create and update requests.
///
/// `url` defaults to an empty string so that a missing url is reported as
/// "Kindly enter Valid Url" rather than a decoding error.
#[derive(Debug, Deserialize)]
pub struct BookmarkRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// Full bookmark record as returned by the API.
#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub id: i64,
    pub url: String,
    pub short_url: String,
    pub visit: i64,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bookmark> for BookmarkResponse {
    fn from(b: Bookmark) -> Self {
        Self {
            id: b.id,
            url: b.url,
            short_url: b.short_url,
            visit: b.visit,
            body: b.body,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookmarkListResponse {
    pub data: Vec<BookmarkResponse>,
    pub meta: PaginationMeta,
}

/// Visit counter of one bookmark.
#[derive(Debug, Serialize)]
pub struct BookmarkStat {
    pub id: i64,
    pub visits: i64,
    pub url: String,
    pub short_url: String,
}

impl From<Bookmark> for BookmarkStat {
    fn from(b: Bookmark) -> Self {
        Self {
            id: b.id,
            visits: b.visit,
            url: b.url,
            short_url: b.short_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookmarkStatsResponse {
    pub data: Vec<BookmarkStat>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
