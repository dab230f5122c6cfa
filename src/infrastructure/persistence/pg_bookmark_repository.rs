//! PostgreSQL implementation of bookmark repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Bookmark, BookmarkUpdate, NewBookmark};
use crate::domain::repositories::BookmarkRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct BookmarkRow {
    id: i64,
    url: String,
    short_url: String,
    body: Option<String>,
    visit: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookmarkRow> for Bookmark {
    fn from(r: BookmarkRow) -> Self {
        Bookmark::new(
            r.id,
            r.url,
            r.short_url,
            r.body,
            r.visit,
            r.user_id,
            r.created_at,
            r.updated_at,
        )
    }
}

/// PostgreSQL repository for bookmarks.
///
/// Ownership is enforced in SQL: every user-scoped statement filters on
/// `user_id` alongside the primary key.
pub struct PgBookmarkRepository {
    pool: Arc<PgPool>,
}

impl PgBookmarkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    async fn create(&self, new_bookmark: NewBookmark) -> Result<Bookmark, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BookmarkRow>(
            r#"
            INSERT INTO bookmarks (url, short_url, body, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, url, short_url, body, visit, user_id, created_at, updated_at
            "#,
        )
        .bind(&new_bookmark.url)
        .bind(&new_bookmark.short_url)
        .bind(&new_bookmark.body)
        .bind(new_bookmark.user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_owned(&self, id: i64, user_id: i64) -> Result<Option<Bookmark>, AppError> {
        let row = sqlx::query_as::<_, BookmarkRow>(
            r#"
            SELECT id, url, short_url, body, visit, user_id, created_at, updated_at
            FROM bookmarks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Bookmark::from))
    }

    async fn url_exists(&self, url: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM bookmarks WHERE url = $1)",
        )
        .bind(url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn short_url_exists(&self, short_url: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM bookmarks WHERE short_url = $1)",
        )
        .bind(short_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Bookmark>, AppError> {
        let rows = sqlx::query_as::<_, BookmarkRow>(
            r#"
            SELECT id, url, short_url, body, visit, user_id, created_at, updated_at
            FROM bookmarks
            WHERE user_id = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Bookmark::from).collect())
    }

    async fn count_by_user(&self, user_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookmarks WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn list_all_by_user(&self, user_id: i64) -> Result<Vec<Bookmark>, AppError> {
        let rows = sqlx::query_as::<_, BookmarkRow>(
            r#"
            SELECT id, url, short_url, body, visit, user_id, created_at, updated_at
            FROM bookmarks
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Bookmark::from).collect())
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        update: BookmarkUpdate,
    ) -> Result<Option<Bookmark>, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BookmarkRow>(
            r#"
            UPDATE bookmarks
            SET url = $3, body = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, url, short_url, body, visit, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&update.url)
        .bind(&update.body)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.map(Bookmark::from))
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_visit(&self, short_url: &str) -> Result<Option<String>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Single-statement increment: concurrent visits never lose an update.
        let url = sqlx::query_scalar::<_, String>(
            r#"
            UPDATE bookmarks
            SET visit = visit + 1
            WHERE short_url = $1
            RETURNING url
            "#,
        )
        .bind(short_url)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(url)
    }

    async fn top_visited(&self, limit: i64) -> Result<Vec<Bookmark>, AppError> {
        let rows = sqlx::query_as::<_, BookmarkRow>(
            r#"
            SELECT id, url, short_url, body, visit, user_id, created_at, updated_at
            FROM bookmarks
            ORDER BY visit DESC, id
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Bookmark::from).collect())
    }
}
