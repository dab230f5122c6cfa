//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and shape checks
//! - [`url_validator`] - Bookmark URL validation
//! - [`password`] - Argon2 password hashing
//! - [`db_error`] - PostgreSQL constraint violation helpers

pub mod code_generator;
pub mod db_error;
pub mod password;
pub mod url_validator;
