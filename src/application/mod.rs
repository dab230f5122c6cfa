//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation, and business rules.
//! They consume repository traits and provide a clean API for HTTP handlers
//! and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Registration, login, identity lookup
//! - [`services::token_service::TokenService`] - Access and refresh token issuance and verification
//! - [`services::bookmark_service::BookmarkService`] - Bookmark CRUD, pagination, redirects

pub mod services;
