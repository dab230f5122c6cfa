//! Bookmark management and short-code resolution.

use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use crate::domain::entities::{Bookmark, BookmarkUpdate, NewBookmark};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CODE_SPACE, generate_code, is_valid_code};
use crate::utils::db_error::BOOKMARKS_SHORT_URL_KEY;
use crate::utils::url_validator::validate_url;

/// Upper bound on short-code draws per creation, and on insert attempts.
pub const MAX_CODE_ATTEMPTS: usize = 32;

/// One page of a user's bookmarks.
#[derive(Debug, Clone)]
pub struct BookmarkPage {
    pub items: Vec<Bookmark>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Service for bookmark CRUD, statistics, and redirects.
///
/// All user-facing lookups are ownership-scoped: the repository filters by
/// owner, and a bookmark owned by someone else surfaces as
/// [`AppError::NotFound`], exactly like a missing one.
pub struct BookmarkService<R: BookmarkRepository> {
    repository: Arc<R>,
}

fn invalid_url(url: &str, reason: impl ToString) -> AppError {
    AppError::bad_request(
        "Kindly enter Valid Url",
        json!({ "url": url, "reason": reason.to_string() }),
    )
}

fn bookmark_not_found(id: i64) -> AppError {
    AppError::not_found("Not found", json!({ "id": id }))
}

fn code_space_exhausted() -> AppError {
    AppError::internal(
        "Short code space exhausted",
        json!({ "attempts": MAX_CODE_ATTEMPTS }),
    )
}

impl<R: BookmarkRepository> BookmarkService<R> {
    /// Creates a new bookmark service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a bookmark with a freshly generated short code.
    ///
    /// The URL pre-check gives a cheap conflict answer; the `bookmarks_url_key`
    /// constraint still decides under concurrency. When a concurrent creation
    /// grabs the same short code between the availability check and the
    /// insert, a new code is drawn and the insert retried.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `url` is not a well-formed HTTP(S) URL
    /// - [`AppError::Conflict`] if `url` is already bookmarked by anyone
    /// - [`AppError::Internal`] if no free short code is found
    #[instrument(name = "BookmarkService: create", skip(self, body))]
    pub async fn create(
        &self,
        user_id: i64,
        url: String,
        body: Option<String>,
    ) -> Result<Bookmark, AppError> {
        validate_url(&url).map_err(|e| invalid_url(&url, e))?;

        if self.repository.url_exists(&url).await? {
            return Err(AppError::conflict(
                "URL already exist",
                json!({ "url": url }),
            ));
        }

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let short_url = self.generate_unique_code().await?;

            let result = self
                .repository
                .create(NewBookmark {
                    url: url.clone(),
                    short_url: short_url.clone(),
                    body: body.clone(),
                    user_id,
                })
                .await;

            match result {
                Err(e) if e.violated_constraint() == Some(BOOKMARKS_SHORT_URL_KEY) => {
                    tracing::warn!(%short_url, attempt, "Short code taken concurrently, retrying");
                }
                Ok(bookmark) => {
                    tracing::info!(
                        bookmark_id = bookmark.id,
                        short_url = %bookmark.short_url,
                        "Bookmark created"
                    );
                    return Ok(bookmark);
                }
                Err(e) => return Err(e),
            }
        }

        Err(code_space_exhausted())
    }

    /// Returns one page of the user's bookmarks.
    ///
    /// `page` is 1-indexed. A page past the end is empty, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `page` or `per_page` is zero.
    pub async fn list(
        &self,
        user_id: i64,
        page: u32,
        per_page: u32,
    ) -> Result<BookmarkPage, AppError> {
        if page == 0 || per_page == 0 {
            return Err(AppError::bad_request(
                "page and per_page must be at least 1",
                json!({ "page": page, "per_page": per_page }),
            ));
        }

        let limit = i64::from(per_page);
        let offset = (i64::from(page) - 1) * limit;

        let (items, total) = tokio::try_join!(
            self.repository.list_by_user(user_id, limit, offset),
            self.repository.count_by_user(user_id)
        )?;

        Ok(BookmarkPage {
            items,
            page,
            per_page,
            total,
        })
    }

    /// Returns a bookmark owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if it does not exist or belongs to someone else.
    pub async fn get(&self, user_id: i64, id: i64) -> Result<Bookmark, AppError> {
        self.repository
            .find_owned(id, user_id)
            .await?
            .filter(|b| b.is_owned_by(user_id))
            .ok_or_else(|| bookmark_not_found(id))
    }

    /// Replaces url and body of an owned bookmark.
    ///
    /// Ownership is checked before the URL, so a foreign id reports 404 even
    /// with an invalid URL. `short_url` and `visit` are never modified.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the bookmark is missing or foreign
    /// - [`AppError::Validation`] if `url` is malformed
    /// - [`AppError::Conflict`] if another bookmark already stores `url`
    #[instrument(name = "BookmarkService: update", skip(self, body))]
    pub async fn update(
        &self,
        user_id: i64,
        id: i64,
        url: String,
        body: Option<String>,
    ) -> Result<Bookmark, AppError> {
        self.get(user_id, id).await?;

        validate_url(&url).map_err(|e| invalid_url(&url, e))?;

        self.repository
            .update(id, user_id, BookmarkUpdate { url, body })
            .await?
            .ok_or_else(|| bookmark_not_found(id))
    }

    /// Permanently deletes an owned bookmark and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if it does not exist or belongs to someone else.
    #[instrument(name = "BookmarkService: delete", skip(self))]
    pub async fn delete(&self, user_id: i64, id: i64) -> Result<i64, AppError> {
        if !self.repository.delete(id, user_id).await? {
            return Err(bookmark_not_found(id));
        }

        tracing::info!(bookmark_id = id, "Bookmark deleted");

        Ok(id)
    }

    /// Returns every bookmark owned by `user_id`, unpaginated.
    pub async fn stats(&self, user_id: i64) -> Result<Vec<Bookmark>, AppError> {
        self.repository.list_all_by_user(user_id).await
    }

    /// Resolves a short code to its URL and counts the visit.
    ///
    /// Paths that cannot be a short code are rejected without a query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bookmark has this short code.
    pub async fn resolve_short_url(&self, short_url: &str) -> Result<String, AppError> {
        if !is_valid_code(short_url) {
            return Err(AppError::not_found(
                "Not Found",
                json!({ "short_url": short_url }),
            ));
        }

        self.repository
            .record_visit(short_url)
            .await?
            .ok_or_else(|| AppError::not_found("Not Found", json!({ "short_url": short_url })))
    }

    /// Draws short codes until one is not yet assigned.
    ///
    /// Gives up after [`MAX_CODE_ATTEMPTS`] collisions: with 238,328 possible
    /// codes that only happens once the table is close to full.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code();

            if !self.repository.short_url_exists(&code).await? {
                return Ok(code);
            }
        }

        tracing::error!(
            attempts = MAX_CODE_ATTEMPTS,
            code_space = CODE_SPACE,
            "Could not find a free short code"
        );

        Err(code_space_exhausted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockBookmarkRepository;
    use crate::utils::code_generator::SHORT_CODE_LENGTH;
    use chrono::Utc;
    use mockall::Sequence;

    fn create_test_bookmark(id: i64, user_id: i64, url: &str, short_url: &str) -> Bookmark {
        Bookmark::new(
            id,
            url.to_string(),
            short_url.to_string(),
            Some("notes".to_string()),
            0,
            user_id,
            Utc::now(),
            Utc::now(),
        )
    }

    fn echo_create(new_bookmark: NewBookmark) -> Result<Bookmark, AppError> {
        Ok(Bookmark::new(
            10,
            new_bookmark.url,
            new_bookmark.short_url,
            new_bookmark.body,
            0,
            new_bookmark.user_id,
            Utc::now(),
            Utc::now(),
        ))
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut mock_repo = MockBookmarkRepository::new();

        mock_repo
            .expect_url_exists()
            .withf(|url| url == "https://example.com")
            .times(1)
            .returning(|_| Ok(false));
        mock_repo
            .expect_short_url_exists()
            .times(1)
            .returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .withf(|b| b.user_id == 1 && b.short_url.len() == SHORT_CODE_LENGTH)
            .times(1)
            .returning(echo_create);

        let service = BookmarkService::new(Arc::new(mock_repo));

        let bookmark = service
            .create(1, "https://example.com".to_string(), Some("notes".to_string()))
            .await
            .unwrap();

        assert_eq!(bookmark.url, "https://example.com");
        assert_eq!(bookmark.body.as_deref(), Some("notes"));
        assert!(is_valid_code(&bookmark.short_url));
        assert_eq!(bookmark.visit, 0);
    }

    #[tokio::test]
    async fn test_create_invalid_url() {
        let mut mock_repo = MockBookmarkRepository::new();
        mock_repo.expect_url_exists().times(0);
        mock_repo.expect_create().times(0);

        let service = BookmarkService::new(Arc::new(mock_repo));

        let err = service
            .create(1, "not-a-url".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_duplicate_url_is_conflict() {
        let mut mock_repo = MockBookmarkRepository::new();
        mock_repo
            .expect_url_exists()
            .times(1)
            .returning(|_| Ok(true));
        mock_repo.expect_create().times(0);

        let service = BookmarkService::new(Arc::new(mock_repo));

        let err = service
            .create(1, "https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_redraws_on_collision() {
        let mut mock_repo = MockBookmarkRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_url_exists()
            .times(1)
            .returning(|_| Ok(false));
        mock_repo
            .expect_short_url_exists()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        mock_repo
            .expect_short_url_exists()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .times(1)
            .returning(echo_create);

        let service = BookmarkService::new(Arc::new(mock_repo));

        let result = service
            .create(1, "https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_gives_up_when_code_space_is_full() {
        let mut mock_repo = MockBookmarkRepository::new();

        mock_repo
            .expect_url_exists()
            .times(1)
            .returning(|_| Ok(false));
        mock_repo
            .expect_short_url_exists()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|_| Ok(true));
        mock_repo.expect_create().times(0);

        let service = BookmarkService::new(Arc::new(mock_repo));

        let err = service
            .create(1, "https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Short code space exhausted");
    }

    #[tokio::test]
    async fn test_create_retries_insert_on_short_code_race() {
        let mut mock_repo = MockBookmarkRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_url_exists()
            .times(1)
            .returning(|_| Ok(false));
        mock_repo
            .expect_short_url_exists()
            .times(2)
            .returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(AppError::conflict(
                    "Short code already in use",
                    json!({ "constraint": BOOKMARKS_SHORT_URL_KEY }),
                ))
            });
        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(echo_create);

        let service = BookmarkService::new(Arc::new(mock_repo));

        let result = service
            .create(1, "https://example.com".to_string(), None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_url_race_is_reported_as_conflict() {
        let mut mock_repo = MockBookmarkRepository::new();

        mock_repo
            .expect_url_exists()
            .times(1)
            .returning(|_| Ok(false));
        mock_repo
            .expect_short_url_exists()
            .times(1)
            .returning(|_| Ok(false));
        mock_repo.expect_create().times(1).returning(|_| {
            Err(AppError::conflict(
                "URL already exist",
                json!({ "constraint": "bookmarks_url_key" }),
            ))
        });

        let service = BookmarkService::new(Arc::new(mock_repo));

        let err = service
            .create(1, "https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_get_foreign_bookmark_is_not_found() {
        let mut mock_repo = MockBookmarkRepository::new();
        mock_repo
            .expect_find_owned()
            .withf(|id, user_id| *id == 3 && *user_id == 2)
            .times(1)
            .returning(|_, _| Ok(None));

        let service = BookmarkService::new(Arc::new(mock_repo));

        let err = service.get(2, 3).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_checks_ownership_before_url() {
        let mut mock_repo = MockBookmarkRepository::new();
        mock_repo
            .expect_find_owned()
            .times(1)
            .returning(|_, _| Ok(None));
        mock_repo.expect_update().times(0);

        let service = BookmarkService::new(Arc::new(mock_repo));

        let err = service
            .update(2, 3, "not-a-url".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_invalid_url() {
        let mut mock_repo = MockBookmarkRepository::new();
        let existing = create_test_bookmark(3, 1, "https://old.com", "abc");
        mock_repo
            .expect_find_owned()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));
        mock_repo.expect_update().times(0);

        let service = BookmarkService::new(Arc::new(mock_repo));

        let err = service
            .update(1, 3, "not-a-url".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_update_success() {
        let mut mock_repo = MockBookmarkRepository::new();
        let existing = create_test_bookmark(3, 1, "https://old.com", "abc");
        mock_repo
            .expect_find_owned()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));
        mock_repo
            .expect_update()
            .withf(|id, user_id, update| {
                *id == 3 && *user_id == 1 && update.url == "https://new.com" && update.body.is_none()
            })
            .times(1)
            .returning(|id, user_id, update| {
                let mut bookmark = create_test_bookmark(id, user_id, &update.url, "abc");
                bookmark.body = update.body;
                Ok(Some(bookmark))
            });

        let service = BookmarkService::new(Arc::new(mock_repo));

        let bookmark = service
            .update(1, 3, "https://new.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(bookmark.url, "https://new.com");
        assert_eq!(bookmark.short_url, "abc");
        assert!(bookmark.body.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut mock_repo = MockBookmarkRepository::new();
        mock_repo
            .expect_delete()
            .times(1)
            .returning(|_, _| Ok(false));

        let service = BookmarkService::new(Arc::new(mock_repo));

        assert!(matches!(
            service.delete(1, 3).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_list_computes_offset() {
        let mut mock_repo = MockBookmarkRepository::new();
        mock_repo
            .expect_list_by_user()
            .withf(|user_id, limit, offset| *user_id == 1 && *limit == 5 && *offset == 10)
            .times(1)
            .returning(|_, _, _| Ok(vec![create_test_bookmark(11, 1, "https://a.com", "aaa")]));
        mock_repo
            .expect_count_by_user()
            .times(1)
            .returning(|_| Ok(11));

        let service = BookmarkService::new(Arc::new(mock_repo));

        let page = service.list(1, 3, 5).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 11);
        assert_eq!(page.page, 3);
        assert_eq!(page.per_page, 5);
    }

    #[tokio::test]
    async fn test_list_rejects_zero_page() {
        let service = BookmarkService::new(Arc::new(MockBookmarkRepository::new()));

        assert!(matches!(
            service.list(1, 0, 5).await.unwrap_err(),
            AppError::Validation { .. }
        ));
        assert!(matches!(
            service.list(1, 1, 0).await.unwrap_err(),
            AppError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_resolve_short_url() {
        let mut mock_repo = MockBookmarkRepository::new();
        mock_repo
            .expect_record_visit()
            .withf(|code| code == "aB3")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let service = BookmarkService::new(Arc::new(mock_repo));

        assert_eq!(
            service.resolve_short_url("aB3").await.unwrap(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_database() {
        let mut mock_repo = MockBookmarkRepository::new();
        mock_repo.expect_record_visit().times(0);

        let service = BookmarkService::new(Arc::new(mock_repo));

        assert!(matches!(
            service.resolve_short_url("favicon.ico").await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut mock_repo = MockBookmarkRepository::new();
        mock_repo
            .expect_record_visit()
            .times(1)
            .returning(|_| Ok(None));

        let service = BookmarkService::new(Arc::new(mock_repo));

        assert!(matches!(
            service.resolve_short_url("zzz").await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }
}
