//! MySQL implementation of the ProjectRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use fh_core::domain::entities::project::{Project, ProjectStatus};
use fh_core::errors::DomainError;
use fh_core::repositories::ProjectRepository;

use super::store_error;

/// MySQL implementation of ProjectRepository
#[derive(Clone)]
pub struct MySqlProjectRepository {
    pool: MySqlPool,
}

impl MySqlProjectRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_project(row: &sqlx::mysql::MySqlRow) -> Result<Project, DomainError> {
        let status: u8 = row.try_get("status").map_err(|e| DomainError::Internal {
            message: format!("Failed to get status: {}", e),
        })?;

        Ok(Project {
            id: row.try_get("id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get id: {}", e),
            })?,
            title: row.try_get("title").map_err(|e| DomainError::Internal {
                message: format!("Failed to get title: {}", e),
            })?,
            status: ProjectStatus::try_from(status)
                .map_err(|message| DomainError::Internal { message })?,
            fund_end_date: row
                .try_get::<Option<DateTime<Utc>>, _>("fund_end_date")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get fund_end_date: {}", e),
                })?,
            updated_at: row.try_get("updated_at").map_err(|e| DomainError::Internal {
                message: format!("Failed to get updated_at: {}", e),
            })?,
        })
    }
}

#[async_trait]
impl ProjectRepository for MySqlProjectRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, status, fund_end_date, updated_at
            FROM projects
            WHERE id = ?
            LIMIT 1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to find project", e))?;

        row.as_ref().map(Self::row_to_project).transpose()
    }

    async fn save(&self, project: Project) -> Result<Project, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, title, status, fund_end_date, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                title = VALUES(title),
                status = VALUES(status),
                fund_end_date = VALUES(fund_end_date),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(project.status.code())
        .bind(project.fund_end_date)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to save project", e))?;

        Ok(project)
    }

    async fn close_ended_projects(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET status = ?, updated_at = ?
            WHERE status <> ? AND fund_end_date IS NOT NULL AND fund_end_date <= ?
            "#,
        )
        .bind(ProjectStatus::Closed.code())
        .bind(Utc::now())
        .bind(ProjectStatus::Closed.code())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to close ended projects", e))?;

        Ok(result.rows_affected() as usize)
    }
}
