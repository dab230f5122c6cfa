//! Extractors with rejections converted into [`AppError`].
//!
//! Axum's stock extractors answer bad input with plain-text bodies. These
//! wrappers keep every failure in the `{"error": ...}` shape.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor. Malformed bodies become `400 Bad Request`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor. Unparseable parameters become `400 Bad Request`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Path extractor. A segment that does not parse (e.g. a non-numeric id)
/// becomes `404 Not Found`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
