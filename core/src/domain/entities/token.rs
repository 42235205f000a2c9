//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Signing domain a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID, keeps two tokens minted in the same second distinct
    pub jti: String,

    /// Signing domain
    pub typ: TokenKind,
}

impl Claims {
    /// Creates claims for `user_id` valid for `lifetime` from `issued_at`
    pub fn new(
        user_id: Uuid,
        kind: TokenKind,
        issuer: &str,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + lifetime).timestamp(),
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
            typ: kind,
        }
    }

    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Token pair returned to the client on login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,

    /// Wall-clock expiry persisted alongside the refresh token
    pub refresh_expires_at: DateTime<Utc>,
}

/// Successful outcome of authenticating a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    /// The authenticated user
    pub user_id: Uuid,

    /// Replacement access token when the presented one had expired
    pub new_access_token: Option<String>,
}

impl Authenticated {
    /// The presented access token was still valid
    pub fn valid(user_id: Uuid) -> Self {
        Self {
            user_id,
            new_access_token: None,
        }
    }

    /// The access token was renewed through the refresh token
    pub fn renewed(user_id: Uuid, access_token: String) -> Self {
        Self {
            user_id,
            new_access_token: Some(access_token),
        }
    }

    pub fn is_renewed(&self) -> bool {
        self.new_access_token.is_some()
    }
}
