//! Project repository trait for the funding-campaign store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::project::Project;
use crate::errors::DomainError;

/// Repository trait for Project persistence operations
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Find a project by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, DomainError>;

    /// Insert or replace a project
    async fn save(&self, project: Project) -> Result<Project, DomainError>;

    /// Close every project whose funding end date is `<= now`
    ///
    /// Projects that are already closed or have no end date are untouched,
    /// so a repeated call reports zero.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of projects whose status changed
    async fn close_ended_projects(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
