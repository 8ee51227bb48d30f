use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{Project, ProjectFilter};
use crate::repository::ProjectRepository;

/// Read-side service for projects. Creation goes through the intake service.
#[derive(Clone)]
pub struct ProjectService<R: ProjectRepository> {
    repository: Arc<R>,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }

    /// Build a service over a repository that is also used elsewhere
    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Get a project by ID
    #[instrument(skip(self), fields(project_id = %id))]
    pub async fn get_project(&self, id: Uuid) -> ProjectResult<Project> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id))
    }

    /// List projects with filters
    #[instrument(skip(self))]
    pub async fn list_projects(&self, filter: ProjectFilter) -> ProjectResult<Vec<Project>> {
        self.repository.list(filter).await
    }
}
