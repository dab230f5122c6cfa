//! Handlers for account and token endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::auth::{
    CurrentUserResponse, LoginRequest, LoginResponse, LoginUser, RefreshResponse,
    RegisterRequest, RegisterResponse,
};
use crate::api::extract::ApiJson;
use crate::api::middleware::{AuthUser, BearerToken};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /api/v1/auth/register`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "email": "alice@example.com", "password": "secret123" }
/// ```
///
/// # Errors
///
/// Returns 400 if a field is invalid and 409 if the email or username is taken.
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user = state
        .auth_service
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User Created".to_string(),
            user: user.into(),
        }),
    ))
}

/// Exchanges credentials for an access/refresh token pair.
///
/// # Endpoint
///
/// `POST /api/v1/auth/login`
///
/// # Response
///
/// ```json
/// {
///   "user": {
///     "access": "<jwt>",
///     "refresh": "<jwt>",
///     "username": "alice",
///     "email": "alice@example.com"
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 404 for an unknown email and 401 for a wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        user: LoginUser {
            access: session.access,
            refresh: session.refresh,
            username: session.user.username,
            email: session.user.email,
        },
    }))
}

/// `GET /api/v1/auth/current_user`
pub async fn current_user_handler(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<CurrentUserResponse>, AppError> {
    let user = state.auth_service.current_user(auth.id).await?;

    Ok(Json(CurrentUserResponse {
        current_user: user.into(),
    }))
}

/// Mints a fresh access token.
///
/// # Endpoint
///
/// `GET /api/v1/auth/token/refresh` with `Authorization: Bearer <refresh token>`
///
/// # Errors
///
/// Returns 401 if the bearer is not a valid refresh token.
pub async fn refresh_token_handler(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<RefreshResponse>, AppError> {
    let access = state.auth_service.refresh(&token)?;

    Ok(Json(RefreshResponse { access }))
}
