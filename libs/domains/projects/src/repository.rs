use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProjectResult;
use crate::models::{Project, ProjectFilter};

/// Repository trait for Project persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Store an accepted project
    async fn create(&self, project: Project) -> ProjectResult<Project>;

    /// Get a project by ID
    async fn get_by_id(&self, id: Uuid) -> ProjectResult<Option<Project>>;

    /// List projects with optional filters, in insertion order
    async fn list(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>>;

    /// Check whether a project with this ID exists
    async fn exists(&self, id: Uuid) -> ProjectResult<bool>;
}

/// In-memory implementation of ProjectRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<Vec<Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, project: Project) -> ProjectResult<Project> {
        let mut projects = self.projects.write().await;
        projects.push(project.clone());

        tracing::info!(project_id = %project.id, manager_id = %project.manager_id, "Created project");
        Ok(project)
    }

    async fn get_by_id(&self, id: Uuid) -> ProjectResult<Option<Project>> {
        let projects = self.projects.read().await;
        Ok(projects.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>> {
        let projects = self.projects.read().await;

        let result = projects
            .iter()
            .filter(|p| filter.matches(p))
            .skip(filter.offset)
            .take(filter.limit)
            .cloned()
            .collect();

        Ok(result)
    }

    async fn exists(&self, id: Uuid) -> ProjectResult<bool> {
        let projects = self.projects.read().await;
        Ok(projects.iter().any(|p| p.id == id))
    }
}
