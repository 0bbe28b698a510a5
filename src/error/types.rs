/**
 * API Error Types
 *
 * This module defines the error taxonomy for the whole service. Each
 * variant maps to a distinct HTTP status so clients can tell the failure
 * modes apart:
 *
 * - `NotFound` - unknown resource or username (404)
 * - `InvalidCredentials` - password mismatch on an open account (401)
 * - `AccountLocked` - lockout threshold reached or account already locked (423)
 * - `MalformedToken` / `ExpiredToken` - token decode failures (401)
 * - `AlreadyExists` - signup collision on username or email (409)
 * - `Validation` - malformed request payload (400)
 * - `Unauthenticated` / `Forbidden` - authorization rejections (401/403)
 *
 * Storage, hashing and token-signing failures are internal (500). None of
 * these are retried by the server; retry is a client decision.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Service-wide error type.
///
/// Returned by services, middleware and handlers; converted to an HTTP
/// response by the `IntoResponse` impl in `conversion.rs`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource or username does not exist
    #[error("{0}")]
    NotFound(String),

    /// Password mismatch on an account that is still open
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Account is locked, either already or by this very attempt
    #[error("account is locked due to too many failed login attempts")]
    AccountLocked,

    /// Token structure or signature is invalid
    #[error("invalid token: {0}")]
    MalformedToken(String),

    /// Token signature is valid but the token is past its expiry
    #[error("token has expired")]
    ExpiredToken,

    /// Signup collision on a unique field
    #[error("{0}")]
    AlreadyExists(String),

    /// Request payload failed validation
    #[error("{0}")]
    Validation(String),

    /// A protected route was hit without an authenticated identity
    #[error("authentication required")]
    Unauthenticated,

    /// The authenticated identity lacks the required authority
    #[error("insufficient permissions")]
    Forbidden,

    /// Credential store failure. Surfaced as-is so a failed lockout
    /// write fails the authentication attempt instead of silently
    /// succeeding with an unpersisted counter.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// bcrypt hashing or verification failure
    #[error("password hashing failed")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Token could not be signed
    #[error("failed to sign token")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),
}

impl ApiError {
    /// Convenience constructor for 404s with a resource description.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Convenience constructor for 400s.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Convenience constructor for 409s.
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::AlreadyExists(message.into())
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::AccountLocked => StatusCode::LOCKED,
            Self::MalformedToken(_) => StatusCode::UNAUTHORIZED,
            Self::ExpiredToken => StatusCode::UNAUTHORIZED,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Database(_) | Self::PasswordHash(_) | Self::TokenSigning(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Human-readable message for the response body.
    ///
    /// Internal errors are collapsed to a generic message so database or
    /// hashing details never leak to clients.
    pub fn message(&self) -> String {
        match self {
            Self::Database(_) | Self::PasswordHash(_) | Self::TokenSigning(_) => {
                "internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}
