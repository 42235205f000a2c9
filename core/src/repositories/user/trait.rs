//! User repository trait: the credential store the token lifecycle talks to.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for the refresh-token fields of the User entity
///
/// "Not found" is a normal outcome (`Ok(None)` / `Ok(false)`). Errors are
/// reserved for the store itself failing and should surface as
/// [`DomainError::StoreUnavailable`].
///
/// Every mutation must be atomic per user record; the token lifecycle and
/// the maintenance sweep never coordinate beyond that.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with given ID
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by ID whose stored refresh digest equals `token_hash`
    ///
    /// # Example
    /// ```no_run
    /// # use uuid::Uuid;
    /// # use fh_core::repositories::UserRepository;
    /// # async fn example(repo: &impl UserRepository, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_by_refresh_token(user_id, "sha256_digest").await? {
    ///     Some(user) => println!("Refresh token is current for {}", user.id),
    ///     None => println!("Refresh token was rotated, revoked or never issued"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_refresh_token(
        &self,
        id: Uuid,
        token_hash: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Store a refresh digest and its expiry, overwriting any previous one
    ///
    /// # Returns
    /// * `Ok(true)` - User updated
    /// * `Ok(false)` - User not found
    async fn set_refresh_token(
        &self,
        id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Clear the refresh digest and expiry of one user
    ///
    /// # Returns
    /// * `Ok(true)` - User found (fields cleared)
    /// * `Ok(false)` - User not found
    async fn clear_refresh_token(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Clear the refresh fields of every user whose stored expiry is `<= now`
    ///
    /// Users without a stored expiry must never match.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of users cleared
    async fn clear_expired_refresh_tokens(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
