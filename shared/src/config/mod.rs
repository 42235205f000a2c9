//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Signing secrets and token lifetimes
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `maintenance` - Periodic sweep scheduling

pub mod auth;
pub mod database;
pub mod environment;
pub mod maintenance;

use serde::{Deserialize, Serialize};

pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use maintenance::MaintenanceConfig;

/// Complete application configuration combining all sub-configurations
///
/// Loaded once at process start and treated as immutable afterwards.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Maintenance sweep configuration
    #[serde(default)]
    pub maintenance: MaintenanceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            maintenance: MaintenanceConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            maintenance: MaintenanceConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check the loaded configuration before wiring services
    pub fn validate(&self) -> Result<(), String> {
        self.jwt.validate()?;
        self.database.validate()?;
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err("Default JWT secrets must not be used in production".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.maintenance.enabled);
    }

    #[test]
    fn test_production_rejects_default_secrets() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_deserializes_without_optional_sections() {
        let json = r#"{
            "environment": "staging",
            "database": {
                "url": "mysql://db/fundhub",
                "max_connections": 5,
                "connect_timeout": 3,
                "idle_timeout": 60,
                "max_lifetime": 600
            },
            "jwt": {
                "access_secret": "a",
                "refresh_secret": "r",
                "access_token_expiry": 600,
                "refresh_token_expiry": 3600
            }
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.jwt.issuer, "fundhub");
        assert_eq!(config.maintenance.interval_seconds, 600);
        assert_eq!(config.logging.level, "info");
    }
}
