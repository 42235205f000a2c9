//! Shared configuration types for the Fundhub server
//!
//! Every crate in the workspace reads its settings from these types so that
//! secrets and connection strings are loaded once and passed down explicitly.

pub mod config;

pub use config::{
    AppConfig, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    MaintenanceConfig,
};
