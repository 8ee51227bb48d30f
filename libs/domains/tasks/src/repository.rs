use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::TaskResult;
use crate::models::Task;

/// Repository trait for Task persistence
///
/// Implementations keep tasks in insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Store an accepted task
    async fn create(&self, task: Task) -> TaskResult<Task>;

    /// Get a task by ID
    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>>;

    /// All tasks of one project
    async fn list_by_project(&self, project_id: Uuid) -> TaskResult<Vec<Task>>;

    /// Count tasks by project
    async fn count_by_project(&self, project_id: Uuid) -> TaskResult<usize>;
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: Task) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;
        tasks.push(task.clone());

        tracing::info!(task_id = %task.id, project_id = %task.project_id, "Created task");
        Ok(task)
    }

    async fn get_by_id(&self, id: Uuid) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn list_by_project(&self, project_id: Uuid) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn count_by_project(&self, project_id: Uuid) -> TaskResult<usize> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().filter(|t| t.project_id == project_id).count())
    }
}
