//! Bearer token authentication middleware and extractors.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Identity of the caller, inserted by [`layer`] after the access token
/// has been verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
}

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().copied().ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Route is not behind the auth layer" }),
            )
        })
    }
}

/// Raw bearer token, for endpoints that verify it themselves
/// (the refresh endpoint expects a refresh token, not an access token).
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthBearer(token) = AuthBearer::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Authorization header is missing or invalid" }),
                )
            })?;

        Ok(BearerToken(token))
    }
}

/// Authenticates requests using access tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <jwt>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Verify signature, expiry, and that it is an access token
/// 3. Attach [`AuthUser`] to the request extensions
/// 4. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing or the token is
/// invalid, expired, or a refresh token. The response carries
/// `WWW-Authenticate: Bearer` per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/bookmarks", get(list_bookmarks_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let BearerToken(token) = BearerToken::from_request_parts(&mut parts, &()).await?;

    let user_id = st.auth_service.authenticate(&token)?;
    parts.extensions.insert(AuthUser { id: user_id });

    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
