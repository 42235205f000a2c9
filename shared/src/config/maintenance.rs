//! Maintenance sweep scheduling configuration

use serde::{Deserialize, Serialize};

/// Configuration for the periodic maintenance sweeps
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MaintenanceConfig {
    /// Whether the periodic trigger is active
    pub enabled: bool,

    /// How often to run the sweeps (in seconds)
    pub interval_seconds: u64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_seconds: 600, // every 10 minutes
        }
    }
}

impl MaintenanceConfig {
    /// Create from `MAINTENANCE_ENABLED` and `MAINTENANCE_INTERVAL_SECONDS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let enabled = std::env::var("MAINTENANCE_ENABLED")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(defaults.enabled);
        let interval_seconds = std::env::var("MAINTENANCE_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(defaults.interval_seconds);

        Self {
            enabled,
            interval_seconds,
        }
    }

    /// Enabled configuration with the given interval
    pub fn every(interval_seconds: u64) -> Self {
        Self {
            enabled: true,
            interval_seconds,
        }
    }
}
