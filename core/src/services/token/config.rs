//! Configuration for the token service

use chrono::Duration;
use fh_shared::config::auth::MAX_TOKEN_LIFETIME_SECONDS;
use fh_shared::config::JwtConfig;
use jsonwebtoken::Algorithm;

/// Configuration for the token service
///
/// Built once at startup and passed by reference into the codec; nothing in
/// the token path reads secrets from the environment.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Access token signing secret
    pub access_secret: String,
    /// Refresh token signing secret
    pub refresh_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// JWT issuer claim
    pub issuer: String,
    /// Access token lifetime
    pub access_token_expiry: Duration,
    /// Refresh token lifetime, also used for the persisted expiry
    pub refresh_token_expiry: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    /// Lifetimes are clamped to `1..=MAX_TOKEN_LIFETIME_SECONDS`; use
    /// [`JwtConfig::validate`] to reject out-of-range values instead.
    fn from(config: &JwtConfig) -> Self {
        Self {
            access_secret: config.access_secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            algorithm: Algorithm::HS256,
            issuer: config.issuer.clone(),
            access_token_expiry: lifetime(config.access_token_expiry),
            refresh_token_expiry: lifetime(config.refresh_token_expiry),
        }
    }
}

fn lifetime(seconds: i64) -> Duration {
    Duration::seconds(seconds.clamp(1, MAX_TOKEN_LIFETIME_SECONDS))
}
