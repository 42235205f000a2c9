//! Token lifecycle: issue on login, verify per request, renew on expiry

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clock::{default_clock, Clock};
use crate::domain::entities::token::{Authenticated, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::UserRepository;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Service managing the access/refresh token pair of each user
pub struct TokenService<R: UserRepository> {
    repository: Arc<R>,
    config: TokenServiceConfig,
    codec: TokenCodec,
    clock: Arc<dyn Clock>,
}

impl<R: UserRepository> TokenService<R> {
    /// Creates a token service reading time from the system clock
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        Self::with_clock(repository, config, default_clock())
    }

    /// Creates a token service with an explicit time source
    pub fn with_clock(repository: Arc<R>, config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let codec = TokenCodec::new(&config, clock.clone());
        Self {
            repository,
            config,
            codec,
            clock,
        }
    }

    /// The codec used for signing and verification
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Issues a fresh token pair after a successful login
    ///
    /// The refresh token digest and its expiry overwrite whatever was stored
    /// for the user, so at most one refresh token is live per user.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The generated token pair
    /// * `Err(TokenError::SubjectNotFound)` - The user does not exist
    /// * `Err(DomainError)` - Signing or persistence failed
    pub async fn issue(&self, user_id: Uuid) -> Result<TokenPair, DomainError> {
        let refresh_token =
            self.codec
                .issue(user_id, TokenKind::Refresh, self.config.refresh_token_expiry)?;
        let access_token =
            self.codec
                .issue(user_id, TokenKind::Access, self.config.access_token_expiry)?;
        let refresh_expires_at = self.clock.now() + self.config.refresh_token_expiry;

        let stored = self
            .repository
            .set_refresh_token(user_id, &Self::hash_token(&refresh_token), refresh_expires_at)
            .await?;
        if !stored {
            warn!(%user_id, "Token pair requested for unknown user");
            return Err(TokenError::SubjectNotFound.into());
        }

        info!(%user_id, "Issued token pair");

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.config.access_token_expiry.num_seconds(),
            refresh_expires_in: self.config.refresh_token_expiry.num_seconds(),
            refresh_expires_at,
        })
    }

    /// Authenticates a request from its access token, renewing it if needed
    ///
    /// An expired access token is renewed when `refresh_token` verifies and
    /// matches the digest stored for the same user. The refresh token itself
    /// is never rotated here, so concurrent renewals do not interfere.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Authenticated))` - Request is authenticated, possibly with
    ///   a new access token to hand back to the client
    /// * `Ok(None)` - Denied. The reason is logged but not returned
    /// * `Err(DomainError)` - The store failed during renewal
    pub async fn authenticate(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<Option<Authenticated>, DomainError> {
        match self.codec.verify(access_token, TokenKind::Access) {
            Ok(user_id) => return Ok(Some(Authenticated::valid(user_id))),
            Err(TokenError::TokenExpired) => {}
            Err(e) => {
                debug!(code = e.code(), "Access token rejected");
                return Ok(None);
            }
        }

        let Some(refresh_token) = refresh_token else {
            debug!("Access token expired and no refresh token was presented");
            return Ok(None);
        };

        match self.renew(refresh_token).await {
            Ok(authenticated) => Ok(Some(authenticated)),
            Err(DomainError::Token(e)) if e != TokenError::TokenGenerationFailed => {
                warn!(code = e.code(), "Refresh token rejected");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Mints a new access token from a refresh token that is still current
    async fn renew(&self, refresh_token: &str) -> Result<Authenticated, DomainError> {
        let user_id = self.codec.verify(refresh_token, TokenKind::Refresh)?;

        // A missing user and a stale digest look the same from here.
        self.repository
            .find_by_refresh_token(user_id, &Self::hash_token(refresh_token))
            .await?
            .ok_or(TokenError::RefreshMismatch)?;

        let access_token =
            self.codec
                .issue(user_id, TokenKind::Access, self.config.access_token_expiry)?;

        info!(%user_id, "Renewed access token");
        Ok(Authenticated::renewed(user_id, access_token))
    }

    /// Revokes the user's refresh token (logout)
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The stored refresh token was cleared
    /// * `Ok(false)` - User not found
    pub async fn revoke(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let cleared = self.repository.clear_refresh_token(user_id).await?;
        if cleared {
            info!(%user_id, "Revoked refresh token");
        }
        Ok(cleared)
    }

    /// Hashes a token for storage and lookup
    pub fn hash_token(token: &str) -> String {
        hex::encode(Sha256::digest(token.as_bytes()))
    }
}
