//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{short_url}` - Short link redirect (public)
//! - `GET  /health`      - Health check (public)
//! - `/api/v1/*`         - REST API, see [`crate::api::routes`]
//!
//! Unknown paths answer `404 {"error": "Not Found"}`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Bearer access token on protected API routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use serde_json::json;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

async fn not_found_handler() -> AppError {
    AppError::not_found("Not Found", json!({}))
}

/// Routes and fallback without rate limiting or tracing.
///
/// [`app_router`] adds those layers for the real server; integration tests
/// drive this router directly since they have no peer socket address.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{short_url}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api::routes::v1_routes(state.clone()))
        .fallback(not_found_handler)
        .with_state(state)
}

/// Constructs the application router with all routes and middleware.
///
/// # Errors
///
/// Returns an error if the rate limit settings are invalid.
pub fn app_router(state: AppState, config: &Config) -> anyhow::Result<NormalizePath<Router>> {
    let router = router(state)
        .layer(rate_limit::layer(
            config.rate_limit_per_second,
            config.rate_limit_burst,
        )?)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
