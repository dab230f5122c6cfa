//! Handlers for bookmark endpoints.
//!
//! Every handler here runs behind [`crate::api::middleware::auth::layer`]
//! and only ever sees bookmarks owned by the caller.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::bookmark::{
    BookmarkListResponse, BookmarkRequest, BookmarkResponse, BookmarkStatsResponse,
    MessageResponse,
};
use crate::api::dto::pagination::{BookmarkListParams, PaginationMeta};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::middleware::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a bookmark with a generated 3-character short code.
///
/// # Endpoint
///
/// `POST /api/v1/bookmarks`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "body": "optional notes" }
/// ```
///
/// # Errors
///
/// Returns 400 if the URL is invalid and 409 if it is already bookmarked.
pub async fn create_bookmark_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<BookmarkRequest>,
) -> Result<(StatusCode, Json<BookmarkResponse>), AppError> {
    let bookmark = state
        .bookmark_service
        .create(auth.id, payload.url, payload.body)
        .await?;

    Ok((StatusCode::CREATED, Json(bookmark.into())))
}

/// Lists the caller's bookmarks, ordered by id.
///
/// # Endpoint
///
/// `GET /api/v1/bookmarks?page=1&per_page=5`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `per_page` (optional): Items per page (default: 5, max: 100)
///
/// # Response
///
/// ```json
/// {
///   "data": [ { "id": 1, "url": "...", "short_url": "aB3", ... } ],
///   "meta": {
///     "page": 1, "pages": 3, "total_count": 12,
///     "prev": null, "next": 2, "has_next": true, "has_prev": false
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn list_bookmarks_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(params): ApiQuery<BookmarkListParams>,
) -> Result<Json<BookmarkListResponse>, AppError> {
    params.validate()?;

    let page = state
        .bookmark_service
        .list(auth.id, params.page(), params.per_page())
        .await?;

    Ok(Json(BookmarkListResponse {
        meta: PaginationMeta::new(page.page, page.per_page, page.total),
        data: page.items.into_iter().map(Into::into).collect(),
    }))
}

/// Returns one of the caller's bookmarks.
///
/// # Endpoint
///
/// `GET /api/v1/bookmarks/{id}`
///
/// Answers `302 Found` with the record as JSON and no `Location` header.
pub async fn get_bookmark_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<(StatusCode, Json<BookmarkResponse>), AppError> {
    let bookmark = state.bookmark_service.get(auth.id, id).await?;

    Ok((StatusCode::FOUND, Json(bookmark.into())))
}

/// Replaces url and body of a bookmark.
///
/// # Endpoint
///
/// `PUT /api/v1/bookmarks/{id}` or `PATCH /api/v1/bookmarks/{id}`
///
/// Both methods take the full `{url, body}` pair; an omitted body clears it.
/// `short_url` and `visit` are never changed.
///
/// # Errors
///
/// Returns 404 if the bookmark is missing or foreign, 400 for an invalid
/// URL, and 409 if another bookmark already stores the URL.
pub async fn update_bookmark_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<BookmarkRequest>,
) -> Result<Json<BookmarkResponse>, AppError> {
    let bookmark = state
        .bookmark_service
        .update(auth.id, id, payload.url, payload.body)
        .await?;

    Ok(Json(bookmark.into()))
}

/// `DELETE /api/v1/bookmarks/{id}`
pub async fn delete_bookmark_handler(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = state.bookmark_service.delete(auth.id, id).await?;

    Ok(Json(MessageResponse {
        message: format!("bookmark with ID: {id} deleted"),
    }))
}

/// Visit counters of all the caller's bookmarks.
///
/// # Endpoint
///
/// `GET /api/v1/bookmarks/stat`
pub async fn stats_handler(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<BookmarkStatsResponse>, AppError> {
    let bookmarks = state.bookmark_service.stats(auth.id).await?;

    Ok(Json(BookmarkStatsResponse {
        data: bookmarks.into_iter().map(Into::into).collect(),
    }))
}
