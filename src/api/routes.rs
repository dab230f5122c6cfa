//! Versioned API route configuration.
//!
//! Routes are mounted under `/api/v1` by [`crate::routes::router`].
//! Bookmark routes and `current_user` require an access token via
//! [`crate::api::middleware::auth`]; register, login, and refresh do not.

use crate::api::handlers::{
    create_bookmark_handler, current_user_handler, delete_bookmark_handler,
    get_bookmark_handler, list_bookmarks_handler, login_handler, refresh_token_handler,
    register_handler, stats_handler, update_bookmark_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Routes that accept anonymous callers.
///
/// # Endpoints
///
/// - `POST /auth/register`      - Create an account
/// - `POST /auth/login`         - Exchange credentials for tokens
/// - `GET  /auth/token/refresh` - New access token from a refresh token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/token/refresh", get(refresh_token_handler))
}

/// Routes that require an access token.
///
/// # Endpoints
///
/// - `GET    /auth/current_user` - Profile of the caller
/// - `GET    /bookmarks`         - Paginated list of the caller's bookmarks
/// - `POST   /bookmarks`         - Create a bookmark
/// - `GET    /bookmarks/stat`    - Visit counts of all the caller's bookmarks
/// - `GET    /bookmarks/{id}`    - Single bookmark
/// - `PUT    /bookmarks/{id}`    - Replace url and body
/// - `PATCH  /bookmarks/{id}`    - Same as `PUT`
/// - `DELETE /bookmarks/{id}`    - Delete a bookmark
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/current_user", get(current_user_handler))
        .route(
            "/bookmarks",
            get(list_bookmarks_handler).post(create_bookmark_handler),
        )
        .route("/bookmarks/stat", get(stats_handler))
        .route(
            "/bookmarks/{id}",
            get(get_bookmark_handler)
                .put(update_bookmark_handler)
                .patch(update_bookmark_handler)
                .delete(delete_bookmark_handler),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::layer))
}

/// All `/api/v1` routes.
pub fn v1_routes(state: AppState) -> Router<AppState> {
    public_routes().merge(protected_routes(state))
}
