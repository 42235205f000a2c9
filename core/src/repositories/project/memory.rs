//! In-memory implementation of ProjectRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::project::Project;
use crate::errors::DomainError;

use super::trait_::ProjectRepository;

/// Project store held in process memory
#[derive(Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<i64, Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, DomainError> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn save(&self, project: Project) -> Result<Project, DomainError> {
        self.projects
            .write()
            .await
            .insert(project.id, project.clone());
        Ok(project)
    }

    async fn close_ended_projects(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut projects = self.projects.write().await;
        let mut closed = 0;

        for project in projects.values_mut() {
            if project.has_ended(now) && project.close() {
                closed += 1;
            }
        }

        Ok(closed)
    }
}
