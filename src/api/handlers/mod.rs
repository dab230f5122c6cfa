//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod bookmarks;
pub mod health;
pub mod redirect;

pub use auth::{current_user_handler, login_handler, refresh_token_handler, register_handler};
pub use bookmarks::{
    create_bookmark_handler, delete_bookmark_handler, get_bookmark_handler,
    list_bookmarks_handler, stats_handler, update_bookmark_handler,
};
pub use health::health_handler;
pub use redirect::redirect_handler;
