//! # Fundhub Infrastructure
//!
//! Concrete adapters for the Fundhub core:
//! - **Database**: MySQL pool and repository implementations using SQLx
//! - **Telemetry**: tracing subscriber setup
//! - **Bootstrap**: configuration loading and service wiring

use std::sync::Arc;

use fh_core::services::{MaintenanceHandle, MaintenanceScheduler, TokenService, TokenServiceConfig};
use fh_shared::config::AppConfig;

pub use fh_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

pub mod telemetry;

use database::{DatabasePool, MySqlProjectRepository, MySqlUserRepository};

/// Token service backed by the MySQL user table
pub type MySqlTokenService = TokenService<MySqlUserRepository>;

/// Maintenance scheduler backed by the MySQL tables
pub type MySqlMaintenanceScheduler = MaintenanceScheduler<MySqlUserRepository, MySqlProjectRepository>;

/// Wired services sharing one connection pool
#[derive(Clone)]
pub struct InfrastructureServices {
    pub pool: DatabasePool,
    pub users: Arc<MySqlUserRepository>,
    pub projects: Arc<MySqlProjectRepository>,
    pub tokens: Arc<MySqlTokenService>,
    pub maintenance: Arc<MySqlMaintenanceScheduler>,
}

impl InfrastructureServices {
    /// Build the services over an existing pool
    pub fn new(pool: DatabasePool, config: &AppConfig) -> Self {
        let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
        let projects = Arc::new(MySqlProjectRepository::new(pool.get_pool().clone()));
        let tokens = Arc::new(TokenService::new(
            users.clone(),
            TokenServiceConfig::from(&config.jwt),
        ));
        let maintenance = Arc::new(MaintenanceScheduler::new(
            users.clone(),
            projects.clone(),
            config.maintenance.clone(),
        ));

        Self {
            pool,
            users,
            projects,
            tokens,
            maintenance,
        }
    }

    /// Start the periodic sweeps if enabled in configuration
    pub fn start_maintenance(&self) -> Option<MaintenanceHandle> {
        self.maintenance.clone().start()
    }

    /// Release the connection pool
    pub async fn shutdown(&self) {
        self.pool.close().await;
    }
}

/// Connect to the store, create missing tables and wire the services
///
/// Tracing should already be installed via [`telemetry::init_tracing`] so the
/// bootstrap itself is logged.
pub async fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services...");

    config.validate().map_err(InfrastructureError::Config)?;

    let pool = DatabasePool::new(config.database.clone()).await?;
    pool.run_migrations().await?;

    tracing::info!("Infrastructure services initialized successfully");

    Ok(InfrastructureServices::new(pool, config))
}

/// Load configuration from the environment, reading `.env` first if present
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    config.validate().map_err(InfrastructureError::Config)?;
    Ok(config)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tracing subscriber could not be installed
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}
