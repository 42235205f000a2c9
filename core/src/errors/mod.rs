//! Domain-specific error types and error handling.

mod types;

pub use types::TokenError;

use thiserror::Error;

/// Errors surfaced by the core services
#[derive(Error, Debug)]
pub enum DomainError {
    /// The backing store could not be reached or rejected the operation.
    /// Never retried here; retry policy belongs to the store transport.
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Shorthand for wrapping a store failure
    pub fn store(message: impl Into<String>) -> Self {
        DomainError::StoreUnavailable {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_bridges_into_domain_error() {
        let err: DomainError = TokenError::TokenExpired.into();
        assert!(matches!(err, DomainError::Token(TokenError::TokenExpired)));
        assert_eq!(err.to_string(), "Token expired");
    }

    #[test]
    fn test_store_shorthand() {
        let err = DomainError::store("connection refused");
        assert!(matches!(err, DomainError::StoreUnavailable { .. }));
        assert_eq!(err.to_string(), "Store unavailable: connection refused");
    }
}
