//! Token error taxonomy
//!
//! Only [`TokenError::TokenExpired`] is recoverable: it sends an access token
//! down the renewal path. Everything else is a hard failure for the call.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    /// The presented refresh token is not the one stored for the subject.
    /// Covers rotated, revoked and never-issued tokens alike.
    #[error("Refresh token does not match stored value")]
    RefreshMismatch,

    /// No user record exists for the token subject
    #[error("Subject not found")]
    SubjectNotFound,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Whether the error only reflects an elapsed lifetime
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::TokenExpired)
    }

    /// Stable identifier recorded as the `code` field of denial logs
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::InvalidClaims => "INVALID_CLAIMS",
            TokenError::RefreshMismatch => "REFRESH_MISMATCH",
            TokenError::SubjectNotFound => "SUBJECT_NOT_FOUND",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }
}
