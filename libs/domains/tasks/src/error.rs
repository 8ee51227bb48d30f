use domain_projects::ProjectError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(Uuid),

    #[error("Project not found: {0}")]
    ProjectNotFound(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<ProjectError> for TaskError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(id) => TaskError::ProjectNotFound(id),
            ProjectError::Internal(msg) => TaskError::Internal(msg),
        }
    }
}
