//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses according to the API contract.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`extract`] - Extractors whose rejections render as [`crate::AppError`]
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication, rate limiting, and tracing
//! - [`routes`] - Versioned route table

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
