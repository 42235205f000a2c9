//! MySQL repository implementations

mod project_repository_impl;
mod user_repository_impl;

pub use project_repository_impl::MySqlProjectRepository;
pub use user_repository_impl::MySqlUserRepository;

use fh_core::errors::DomainError;

/// Map a driver error onto the store-unavailable domain error
pub(crate) fn store_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!("{}: {}", context, e);
    DomainError::store(format!("{}: {}", context, e))
}
