//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and
//! are implemented by PostgreSQL repositories in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! with `mockall` for service unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Account storage and lookup
//! - [`BookmarkRepository`] - Owner-scoped bookmark CRUD and visit counting
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod bookmark_repository;
pub mod user_repository;

pub use bookmark_repository::BookmarkRepository;
pub use user_repository::{UserRepository, UserSummary};

#[cfg(test)]
pub use bookmark_repository::MockBookmarkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
