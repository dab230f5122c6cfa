//! Handler for short URL redirect.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::extract::ApiPath;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its bookmarked URL.
///
/// # Endpoint
///
/// `GET /{short_url}`
///
/// # Request Flow
///
/// 1. Reject anything that is not a 3-character alphanumeric code
/// 2. Increment the visit counter and read the URL in one statement
/// 3. Return 302 Found with `Location` set to the URL
///
/// The increment is committed before the response is built, so every
/// redirect a client receives has been counted.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    ApiPath(short_url): ApiPath<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let url = state.bookmark_service.resolve_short_url(&short_url).await?;

    tracing::debug!(%short_url, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]))
}
