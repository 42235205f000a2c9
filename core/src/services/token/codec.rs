//! Signing and verification of access and refresh tokens

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

struct DomainKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl DomainKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Stateless JWT codec with one key pair per [`TokenKind`]
///
/// Expiry is checked against the injected clock rather than by
/// `jsonwebtoken`, so an elapsed token is reported as
/// [`TokenError::TokenExpired`] only after its signature has verified.
pub struct TokenCodec {
    access: DomainKeys,
    refresh: DomainKeys,
    header: Header,
    validation: Validation,
    issuer: String,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    pub fn new(config: &TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.validate_exp = false;
        validation.validate_nbf = false;

        Self {
            access: DomainKeys::from_secret(&config.access_secret),
            refresh: DomainKeys::from_secret(&config.refresh_secret),
            header: Header::new(config.algorithm),
            validation,
            issuer: config.issuer.clone(),
            clock,
        }
    }

    fn keys(&self, kind: TokenKind) -> &DomainKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    /// Signs a token for `user_id` in the `kind` domain, expiring `lifetime` from now
    pub fn issue(&self, user_id: Uuid, kind: TokenKind, lifetime: Duration) -> Result<String, DomainError> {
        let claims = Claims::new(user_id, kind, &self.issuer, self.clock.now(), lifetime);
        encode(&self.header, &claims, &self.keys(kind).encoding)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies signature, issuer and domain, then expiry
    pub fn decode_claims(&self, token: &str, kind: TokenKind) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.keys(kind).decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidIssuer | ErrorKind::MissingRequiredClaim(_) => {
                    TokenError::InvalidClaims
                }
                _ => TokenError::InvalidTokenFormat,
            })?;

        let claims = token_data.claims;
        if claims.typ != kind {
            return Err(TokenError::InvalidClaims);
        }
        if claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::TokenExpired);
        }

        Ok(claims)
    }

    /// Verifies a token and returns the user ID it was issued for
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<Uuid, TokenError> {
        self.decode_claims(token, kind)?
            .user_id()
            .map_err(|_| TokenError::InvalidClaims)
    }
}
