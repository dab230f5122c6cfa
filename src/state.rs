//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, BookmarkService, TokenService};
use crate::infrastructure::persistence::{PgBookmarkRepository, PgUserRepository};

#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub auth_service: Arc<AuthService<PgUserRepository>>,
    pub bookmark_service: Arc<BookmarkService<PgBookmarkRepository>>,
}

impl AppState {
    /// Wires the PostgreSQL repositories into the services.
    pub fn new(pool: Arc<PgPool>, tokens: Arc<TokenService>) -> Self {
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
        let bookmark_repository = Arc::new(PgBookmarkRepository::new(pool.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(user_repository, tokens)),
            bookmark_service: Arc::new(BookmarkService::new(bookmark_repository)),
            pool,
        }
    }
}
