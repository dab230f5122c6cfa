//! Core domain entities.
//!
//! - [`User`] - A registered account
//! - [`Bookmark`] - A bookmarked URL with its short code
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! (`NewUser`, `NewBookmark`) and modification (`BookmarkUpdate`).

pub mod bookmark;
pub mod user;

pub use bookmark::{Bookmark, BookmarkUpdate, NewBookmark};
pub use user::{NewUser, User};
