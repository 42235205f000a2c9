//! MySQL implementation of the UserRepository trait.
//!
//! Only the refresh-token columns of `users` are touched here. The stored
//! value is the digest computed by the token service, never the raw token.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use fh_core::domain::entities::user::User;
use fh_core::errors::DomainError;
use fh_core::repositories::UserRepository;

use super::store_error;

const SELECT_USER: &str = r#"
    SELECT id, refresh_token, refresh_token_expires_at, created_at, updated_at
    FROM users
"#;

/// MySQL implementation of UserRepository
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a user row, used when seeding and in integration tests
    pub async fn create(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, refresh_token, refresh_token_expires_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.refresh_token_hash)
        .bind(user.refresh_token_expires_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to create user", e))?;

        Ok(())
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            refresh_token_hash: row.try_get("refresh_token").map_err(|e| DomainError::Internal {
                message: format!("Failed to get refresh_token: {}", e),
            })?,
            refresh_token_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("refresh_token_expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get refresh_token_expires_at: {}", e),
                })?,
            created_at: row.try_get("created_at").map_err(|e| DomainError::Internal {
                message: format!("Failed to get created_at: {}", e),
            })?,
            updated_at: row.try_get("updated_at").map_err(|e| DomainError::Internal {
                message: format!("Failed to get updated_at: {}", e),
            })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_USER);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find user", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_refresh_token(
        &self,
        id: Uuid,
        token_hash: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ? AND refresh_token = ? LIMIT 1", SELECT_USER);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find user by refresh token", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn set_refresh_token(
        &self,
        id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = ?, refresh_token_expires_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(token_hash)
        .bind(expires_at)
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to store refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_refresh_token(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = NULL, refresh_token_expires_at = NULL, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to clear refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_expired_refresh_tokens(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = NULL, refresh_token_expires_at = NULL, updated_at = ?
            WHERE refresh_token_expires_at IS NOT NULL AND refresh_token_expires_at <= ?
            "#,
        )
        .bind(Utc::now())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to clear expired refresh tokens", e))?;

        Ok(result.rows_affected() as usize)
    }
}
