//! Maintenance sweeps decoupled from request traffic
//!
//! - Closing projects whose funding period has ended
//! - Clearing refresh tokens whose stored expiry has passed

mod scheduler;

#[cfg(test)]
mod tests;

pub use scheduler::{MaintenanceHandle, MaintenanceScheduler, SweepReport};
