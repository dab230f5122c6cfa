//! Business logic services for the application layer.

pub mod auth_service;
pub mod bookmark_service;
pub mod token_service;

pub use auth_service::{AuthService, LoginSession};
pub use bookmark_service::{BookmarkPage, BookmarkService};
pub use token_service::{Claims, TokenKind, TokenService};
