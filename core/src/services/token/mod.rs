//! Token service module for JWT management
//!
//! - Signing and verification in two independent domains (access, refresh)
//! - Issuing a token pair on login and persisting the refresh token digest
//! - Silent renewal of expired access tokens from a current refresh token
//! - Revocation on logout

mod codec;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use service::TokenService;
