//! Repository trait for bookmarks.

use crate::domain::entities::{Bookmark, BookmarkUpdate, NewBookmark};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for bookmarks.
///
/// Every read or write on behalf of a user takes the owner's id and filters
/// on it. A bookmark owned by someone else is reported exactly like a
/// missing one (`None` / `false`).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookmarkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_bookmark.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Inserts a bookmark in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the URL or the short code is already
    /// taken; the violated constraint is available through
    /// [`AppError::violated_constraint`].
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_bookmark: NewBookmark) -> Result<Bookmark, AppError>;

    /// Finds a bookmark by id, only if `user_id` owns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_owned(&self, id: i64, user_id: i64) -> Result<Option<Bookmark>, AppError>;

    /// Returns true if any bookmark, of any user, stores `url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn url_exists(&self, url: &str) -> Result<bool, AppError>;

    /// Returns true if `short_url` is already assigned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn short_url_exists(&self, short_url: &str) -> Result<bool, AppError>;

    /// Lists one page of the user's bookmarks ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Bookmark>, AppError>;

    /// Counts the user's bookmarks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_user(&self, user_id: i64) -> Result<i64, AppError>;

    /// Lists every bookmark the user owns, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_all_by_user(&self, user_id: i64) -> Result<Vec<Bookmark>, AppError>;

    /// Replaces url and body of an owned bookmark and refreshes `updated_at`.
    ///
    /// Returns `Ok(None)` if the bookmark does not exist or belongs to
    /// another user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new URL belongs to another bookmark.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(
        &self,
        id: i64,
        user_id: i64,
        update: BookmarkUpdate,
    ) -> Result<Option<Bookmark>, AppError>;

    /// Permanently deletes an owned bookmark.
    ///
    /// Returns `Ok(true)` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Atomically increments the visit counter of `short_url` and returns
    /// the target URL.
    ///
    /// Returns `Ok(None)` if no bookmark has this short code. The increment
    /// is committed before this method returns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_visit(&self, short_url: &str) -> Result<Option<String>, AppError>;

    /// Returns the most visited bookmarks across all users.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn top_visited(&self, limit: i64) -> Result<Vec<Bookmark>, AppError>;
}
