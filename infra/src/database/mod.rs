//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and schema bootstrap
//! - `UserRepository` and `ProjectRepository` implementations

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlProjectRepository, MySqlUserRepository};
