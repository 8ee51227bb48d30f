use domain_projects::ProjectRepository;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::Task;
use crate::repository::TaskRepository;

/// Read-side service for tasks nested under projects
#[derive(Clone)]
pub struct TaskService<T: TaskRepository, P: ProjectRepository> {
    tasks: Arc<T>,
    projects: Arc<P>,
}

impl<T: TaskRepository, P: ProjectRepository> TaskService<T, P> {
    pub fn new(tasks: T, projects: P) -> Self {
        Self::from_shared(Arc::new(tasks), Arc::new(projects))
    }

    pub fn from_shared(tasks: Arc<T>, projects: Arc<P>) -> Self {
        Self { tasks, projects }
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: Uuid) -> TaskResult<Task> {
        self.tasks
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Tasks of one project.
    ///
    /// An unknown project is an error; a known project without tasks yields
    /// an empty list.
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub async fn list_project_tasks(&self, project_id: Uuid) -> TaskResult<Vec<Task>> {
        if !self.projects.exists(project_id).await? {
            return Err(TaskError::ProjectNotFound(project_id));
        }

        self.tasks.list_by_project(project_id).await
    }
}
