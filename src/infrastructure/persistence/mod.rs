//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters. Writes run inside explicit transactions; a transaction
//! dropped on an error path is rolled back by SQLx.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Account storage and lookup
//! - [`PgBookmarkRepository`] - Bookmark storage, ownership-scoped queries, visit counting

pub mod pg_bookmark_repository;
pub mod pg_user_repository;

pub use pg_bookmark_repository::PgBookmarkRepository;
pub use pg_user_repository::PgUserRepository;
