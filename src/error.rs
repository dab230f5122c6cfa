//! Application error type shared by services, repositories, and handlers.
//!
//! Every error renders as `{"error": "<message>"}`. Structured `details` are
//! logged server-side and never sent to the client.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::utils::db_error::{self, UniqueViolation};

/// Message returned for every 500 response. The real cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Something went wrong on our side, please try again later";

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input (400).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Missing, invalid, or expired credentials (401).
    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// Missing resource, or one owned by somebody else (404).
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Uniqueness violation (409).
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Unexpected failure (500).
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::Validation { details, .. }
            | AppError::Unauthorized { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Conflict { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }

    /// Name of the unique constraint behind a [`AppError::Conflict`], if any.
    pub fn violated_constraint(&self) -> Option<&str> {
        match self {
            AppError::Conflict { details, .. } => details.get("constraint")?.as_str(),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "Request failed with internal error");
                (
                    status,
                    Json(ErrorBody {
                        error: INTERNAL_ERROR_MESSAGE.to_string(),
                    }),
                )
                    .into_response()
            }
            AppError::Unauthorized { message, details } => {
                tracing::debug!(%message, %details, "Request rejected as unauthorized");
                (
                    status,
                    [(header::WWW_AUTHENTICATE, "Bearer")],
                    Json(ErrorBody { error: message }),
                )
                    .into_response()
            }
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details } => {
                tracing::debug!(status = status.as_u16(), %message, %details, "Request rejected");
                (status, Json(ErrorBody { error: message })).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(violation) = db_error::unique_violation(&e) {
            let UniqueViolation { constraint } = violation;
            let message = db_error::conflict_message(constraint.as_deref());
            return AppError::conflict(message, json!({ "constraint": constraint }));
        }

        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid input".to_string());

        AppError::bad_request(message, json!({ "fields": errors.to_string() }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(
            "Invalid query parameters",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::not_found("Not Found", json!({ "reason": rejection.body_text() }))
    }
}
