//! Bookmark entity.

use chrono::{DateTime, Utc};

/// A bookmarked URL owned by a single user.
///
/// `short_url` is the 3-character code served by `GET /{short_url}`; it is
/// assigned before the row is inserted and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Bookmark {
    pub id: i64,
    pub url: String,
    pub short_url: String,
    pub body: Option<String>,
    pub visit: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bookmark {
    /// Creates a new Bookmark instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        url: String,
        short_url: String,
        body: Option<String>,
        visit: i64,
        user_id: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            url,
            short_url,
            body,
            visit,
            user_id,
            created_at,
            updated_at,
        }
    }

    /// Returns true if `user_id` owns this bookmark.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Input data for creating a bookmark.
#[derive(Debug, Clone)]
pub struct NewBookmark {
    pub url: String,
    pub short_url: String,
    pub body: Option<String>,
    pub user_id: i64,
}

/// Replacement values for an existing bookmark.
///
/// Both fields are always written: a missing body clears the stored one.
/// `short_url` and `visit` cannot be changed through an update.
#[derive(Debug, Clone)]
pub struct BookmarkUpdate {
    pub url: String,
    pub body: Option<String>,
}
