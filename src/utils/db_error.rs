//! Helpers for interpreting PostgreSQL constraint violations.
//!
//! The unique constraints declared in `migrations/` are the authoritative
//! guard against duplicate users and bookmarks. Service-level existence
//! checks only avoid a round trip in the common case.

pub const USERS_EMAIL_KEY: &str = "users_email_key";
pub const USERS_USERNAME_KEY: &str = "users_username_key";
pub const BOOKMARKS_URL_KEY: &str = "bookmarks_url_key";
pub const BOOKMARKS_SHORT_URL_KEY: &str = "bookmarks_short_url_key";

/// A unique violation reported by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueViolation {
    pub constraint: Option<String>,
}

/// Returns the violated constraint when `e` is a unique violation.
pub fn unique_violation(e: &sqlx::Error) -> Option<UniqueViolation> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    Some(UniqueViolation {
        constraint: db_err.constraint().map(str::to_owned),
    })
}

/// User-facing message for a violated unique constraint.
pub fn conflict_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(USERS_EMAIL_KEY) => "Email is Taken",
        Some(USERS_USERNAME_KEY) => "Username is Taken",
        Some(BOOKMARKS_URL_KEY) => "URL already exist",
        Some(BOOKMARKS_SHORT_URL_KEY) => "Short code already in use",
        _ => "Resource already exists",
    }
}
