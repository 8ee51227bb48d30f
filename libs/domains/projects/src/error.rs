use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project not found: {0}")]
    NotFound(Uuid),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProjectResult<T> = Result<T, ProjectError>;
