//! Account registration, login, and identity resolution.

use regex::Regex;
use serde_json::json;
use std::sync::{Arc, LazyLock};
use tracing::instrument;
use validator::ValidateEmail;

use crate::application::services::token_service::{TokenKind, TokenService};
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password;

/// Usernames are ASCII letters and digits only.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("username regex is valid"));

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 80;
pub const MAX_EMAIL_LENGTH: usize = 120;

/// Tokens and profile returned by a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

/// Checks registration input without touching the database.
///
/// Rules are applied in order and the first failure wins:
///
/// 1. password is at least 6 characters
/// 2. username is at least 3 (and at most 80) characters
/// 3. username is alphanumeric with no spaces
/// 4. email is well-formed (and at most 120 characters)
///
/// # Errors
///
/// Returns [`AppError::Validation`] describing the first broken rule.
pub fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::bad_request(
            "Password is too short",
            json!({ "min_length": MIN_PASSWORD_LENGTH }),
        ));
    }

    let username_length = username.chars().count();
    if username_length < MIN_USERNAME_LENGTH {
        return Err(AppError::bad_request(
            "Username is too short",
            json!({ "min_length": MIN_USERNAME_LENGTH }),
        ));
    }
    if username_length > MAX_USERNAME_LENGTH {
        return Err(AppError::bad_request(
            "Username is too long",
            json!({ "max_length": MAX_USERNAME_LENGTH }),
        ));
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(AppError::bad_request(
            "Username should be alphanumeric and also no spaces",
            json!({ "username": username }),
        ));
    }

    if !email.validate_email() {
        return Err(AppError::bad_request(
            "Invalid email",
            json!({ "email": email }),
        ));
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(AppError::bad_request(
            "Email is too long",
            json!({ "max_length": MAX_EMAIL_LENGTH }),
        ));
    }

    Ok(())
}

/// Hashes a password on the blocking pool.
pub async fn hash_password(plain: &str) -> Result<String, AppError> {
    let plain = plain.to_owned();

    tokio::task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(|e| {
            AppError::internal("Password hashing task failed", json!({ "reason": e.to_string() }))
        })?
        .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))
}

async fn verify_password(plain: &str, password_hash: &str) -> Result<bool, AppError> {
    let plain = plain.to_owned();
    let password_hash = password_hash.to_owned();

    tokio::task::spawn_blocking(move || password::verify_password(&plain, &password_hash))
        .await
        .map_err(|e| {
            AppError::internal("Password verification task failed", json!({ "reason": e.to_string() }))
        })?
        .map_err(|e| {
            AppError::internal("Failed to verify password", json!({ "reason": e.to_string() }))
        })
}

/// Service for user accounts and bearer authentication.
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<R: UserRepository> AuthService<R> {
    /// Creates a new authentication service.
    pub fn new(repository: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self { repository, tokens }
    }

    /// Registers a new user.
    ///
    /// After [`validate_registration`] passes, email and then username
    /// availability are checked. These lookups only give early, ordered
    /// feedback; the unique constraints on `users` reject a concurrent
    /// duplicate with the same [`AppError::Conflict`].
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for malformed input
    /// - [`AppError::Conflict`] if the email or username is taken
    /// - [`AppError::Internal`] on hashing or database failures
    #[instrument(name = "AuthService: register", skip(self, password), fields(%username, %email))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        validate_registration(username, email, password)?;

        if self.repository.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict(
                "Email is Taken",
                json!({ "field": "email" }),
            ));
        }

        if self.repository.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict(
                "Username is Taken",
                json!({ "field": "username" }),
            ));
        }

        let password_hash = hash_password(password).await?;

        let user = self
            .repository
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");

        Ok(user)
    }

    /// Verifies credentials and issues an access/refresh token pair.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no user has this email
    /// - [`AppError::Unauthorized`] if the password does not match
    /// - [`AppError::Internal`] on hashing, signing, or database failures
    #[instrument(name = "AuthService: login", skip(self, password), fields(%email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSession, AppError> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            tracing::warn!("Login failed: user not found");
            return Err(AppError::not_found("User Not Found", json!({})));
        };

        if !verify_password(password, &user.password_hash).await? {
            tracing::warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(
                "Wrong Credentials",
                json!({ "user_id": user.id }),
            ));
        }

        let access = self.tokens.issue_access(user.id)?;
        let refresh = self.tokens.issue_refresh(user.id)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginSession {
            access,
            refresh,
            user,
        })
    }

    /// Resolves a bearer access token to the user id it is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid, expired,
    /// or not an access token.
    pub fn authenticate(&self, token: &str) -> Result<i64, AppError> {
        self.tokens.verify(token, TokenKind::Access)
    }

    /// Returns the profile of an authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the identity no longer matches a user.
    pub async fn current_user(&self, user_id: i64) -> Result<User, AppError> {
        self.repository.find_by_id(user_id).await?.ok_or_else(|| {
            AppError::unauthorized("User Not Found", json!({ "user_id": user_id }))
        })
    }

    /// Mints a new access token from a refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is invalid, expired,
    /// or not a refresh token.
    pub fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let user_id = self.tokens.verify(refresh_token, TokenKind::Refresh)?;
        self.tokens.issue_access(user_id)
    }
}
