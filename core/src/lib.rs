//! # Fundhub Core
//!
//! Domain layer of the Fundhub crowdfunding backend: the dual-secret token
//! lifecycle, the user and project repository interfaces, and the periodic
//! maintenance sweeps that keep both stores tidy.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{default_clock, Clock, ManualClock, SystemClock};
pub use domain::{Authenticated, Claims, Project, ProjectStatus, TokenKind, TokenPair, User};
pub use errors::{DomainError, TokenError};
pub use repositories::{
    InMemoryProjectRepository, InMemoryUserRepository, ProjectRepository, UserRepository,
};
pub use services::{
    MaintenanceHandle, MaintenanceScheduler, SweepReport, TokenCodec, TokenService,
    TokenServiceConfig,
};
