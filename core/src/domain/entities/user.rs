//! User entity: the subject that access and refresh tokens authenticate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user holding at most one active refresh token
///
/// Only the SHA-256 digest of the refresh token is kept. Logging in again
/// overwrites it, which implicitly revokes the previous refresh token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Digest of the currently active refresh token
    pub refresh_token_hash: Option<String>,

    /// Wall-clock expiry of the stored refresh token
    pub refresh_token_expires_at: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a user with no refresh token
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a user with a known identifier
    pub fn with_id(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            refresh_token_hash: None,
            refresh_token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stores a new refresh token digest, replacing any previous one
    pub fn set_refresh_token(&mut self, token_hash: String, expires_at: DateTime<Utc>) {
        self.refresh_token_hash = Some(token_hash);
        self.refresh_token_expires_at = Some(expires_at);
        self.updated_at = Utc::now();
    }

    /// Drops the stored refresh token and its expiry
    pub fn clear_refresh_token(&mut self) {
        self.refresh_token_hash = None;
        self.refresh_token_expires_at = None;
        self.updated_at = Utc::now();
    }

    /// Whether the stored digest equals `token_hash`
    pub fn holds_refresh_token(&self, token_hash: &str) -> bool {
        self.refresh_token_hash.as_deref() == Some(token_hash)
    }

    /// Whether the stored refresh token expired at or before `now`
    ///
    /// A user with no stored expiry is never considered expired.
    pub fn refresh_token_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.refresh_token_expires_at, Some(expires_at) if expires_at <= now)
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}
