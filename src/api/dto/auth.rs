//! DTOs for the authentication endpoints.
//!
//! Request fields default to empty strings, so a missing field fails the
//! same validation rule as an empty one instead of a JSON decoding error.

use serde::{Deserialize, Serialize};

use crate::domain::entities::User;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public profile of a user.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserProfile,
}

/// Tokens plus profile, nested under `user` in the login response.
#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub access: String,
    pub refresh: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: LoginUser,
}

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    #[serde(rename = "currentUser")]
    pub current_user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}
