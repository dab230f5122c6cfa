//! Stateless access and refresh tokens.
//!
//! Tokens are HS256-signed JWTs. Nothing is stored server-side: a token is
//! valid while its signature checks out and `exp` has not passed. The `type`
//! claim separates the two token classes so a refresh token can never be
//! used as an access token, and vice versa.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

/// Seconds of clock skew tolerated when checking `exp` and `nbf`.
const LEEWAY_SECONDS: u64 = 5;

/// Token class carried in the `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    #[serde(rename = "type")]
    pub kind: TokenKind,
}

/// Issues and verifies user tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Creates a token service.
    ///
    /// # Arguments
    ///
    /// - `secret` - HMAC key shared by issuance and verification
    /// - `access_ttl` - lifetime of access tokens
    /// - `refresh_ttl` - lifetime of refresh tokens
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECONDS;
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issues a token of the given class for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue(&self, user_id: i64, kind: TokenKind) -> Result<String, AppError> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + ttl).timestamp(),
            kind,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            AppError::internal("Failed to sign token", json!({ "reason": e.to_string() }))
        })
    }

    pub fn issue_access(&self, user_id: i64) -> Result<String, AppError> {
        self.issue(user_id, TokenKind::Access)
    }

    pub fn issue_refresh(&self, user_id: i64) -> Result<String, AppError> {
        self.issue(user_id, TokenKind::Refresh)
    }

    /// Verifies a token and returns the user id it is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the signature is invalid, the
    /// token is expired or not yet valid, the subject is malformed, or the
    /// token class is not `expected`.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<i64, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            AppError::unauthorized("Invalid or expired token", json!({ "reason": e.to_string() }))
        })?;

        if data.claims.kind != expected {
            let message = match expected {
                TokenKind::Access => "Access token required",
                TokenKind::Refresh => "Refresh token required",
            };
            return Err(AppError::unauthorized(
                message,
                json!({ "token_type": data.claims.kind }),
            ));
        }

        data.claims.sub.parse::<i64>().map_err(|_| {
            AppError::unauthorized("Invalid or expired token", json!({ "reason": "bad subject" }))
        })
    }
}
