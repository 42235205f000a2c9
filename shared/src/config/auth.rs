//! Credential signing configuration

use serde::{Deserialize, Serialize};

const DEFAULT_ACCESS_SECRET: &str = "access-secret-change-in-production";
const DEFAULT_REFRESH_SECRET: &str = "refresh-secret-change-in-production";

/// Longest accepted token lifetime in seconds (30 days)
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 30 * 24 * 60 * 60;

/// JWT configuration for the two signing domains
///
/// Access and refresh tokens are signed with separate secrets so that a
/// leaked access secret cannot be used to mint refresh tokens.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret for signing access tokens
    pub access_secret: String,

    /// Secret for signing refresh tokens
    pub refresh_secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from(DEFAULT_ACCESS_SECRET),
            refresh_secret: String::from(DEFAULT_REFRESH_SECRET),
            access_token_expiry: 600,   // 10 minutes
            refresh_token_expiry: 3600, // 1 hour
            issuer: default_issuer(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with both secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    ///
    /// Reads `JWT_ACCESS_SECRET`, `JWT_REFRESH_SECRET`,
    /// `JWT_ACCESS_EXPIRY_SECONDS`, `JWT_REFRESH_EXPIRY_SECONDS` and
    /// `JWT_ISSUER`, falling back to defaults for anything missing.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            access_secret: std::env::var("JWT_ACCESS_SECRET").unwrap_or(defaults.access_secret),
            refresh_secret: std::env::var("JWT_REFRESH_SECRET").unwrap_or(defaults.refresh_secret),
            access_token_expiry: std::env::var("JWT_ACCESS_EXPIRY_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expiry),
            refresh_token_expiry: std::env::var("JWT_REFRESH_EXPIRY_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expiry),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in minutes
    pub fn with_refresh_expiry_minutes(mut self, minutes: i64) -> Self {
        self.refresh_token_expiry = minutes * 60;
        self
    }

    /// Check if either domain still uses a built-in secret
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }

    /// Reject configurations that cannot produce verifiable tokens
    pub fn validate(&self) -> Result<(), String> {
        if self.access_secret.is_empty() || self.refresh_secret.is_empty() {
            return Err("JWT secrets must not be empty".to_string());
        }
        if self.access_token_expiry <= 0 || self.refresh_token_expiry <= 0 {
            return Err("JWT expiry values must be positive".to_string());
        }
        if self.access_token_expiry > MAX_TOKEN_LIFETIME_SECONDS
            || self.refresh_token_expiry > MAX_TOKEN_LIFETIME_SECONDS
        {
            return Err(format!(
                "JWT expiry values must not exceed {} seconds",
                MAX_TOKEN_LIFETIME_SECONDS
            ));
        }
        if self.access_secret == self.refresh_secret {
            tracing::warn!("Access and refresh tokens share the same signing secret");
        }
        Ok(())
    }
}

fn default_issuer() -> String {
    String::from("fundhub")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lifetimes() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 600);
        assert_eq!(config.refresh_token_expiry, 3600);
        assert!(config.is_using_default_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_helpers() {
        let config = JwtConfig::new("a", "r")
            .with_access_expiry_minutes(5)
            .with_refresh_expiry_minutes(30);
        assert_eq!(config.access_token_expiry, 300);
        assert_eq!(config.refresh_token_expiry, 1800);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let config = JwtConfig::new("", "refresh");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_expiry() {
        let mut config = JwtConfig::new("a", "r");
        config.refresh_token_expiry = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_expiry() {
        let mut config = JwtConfig::new("a", "r");
        config.access_token_expiry = i64::MAX;
        assert!(config.validate().is_err());

        config.access_token_expiry = MAX_TOKEN_LIFETIME_SECONDS;
        assert!(config.validate().is_ok());
    }
}
