//! Business services containing domain logic and use cases.

pub mod maintenance;
pub mod token;

pub use maintenance::{MaintenanceHandle, MaintenanceScheduler, SweepReport};
pub use token::{TokenCodec, TokenService, TokenServiceConfig};
