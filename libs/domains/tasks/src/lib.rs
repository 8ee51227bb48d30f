//! Tasks Domain
//!
//! Tasks always belong to a project. Creation goes through the intake
//! service; this crate holds the model, storage and read paths.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Nested listing under a project, lookups
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_projects::InMemoryProjectRepository;
//! use domain_tasks::{InMemoryTaskRepository, TaskService};
//!
//! # async fn example(project_id: uuid::Uuid) -> domain_tasks::TaskResult<()> {
//! let service = TaskService::new(
//!     InMemoryTaskRepository::new(),
//!     InMemoryProjectRepository::new(),
//! );
//! let tasks = service.list_project_tasks(project_id).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{TaskError, TaskResult};
pub use models::{CreateTask, Task};
pub use repository::{InMemoryTaskRepository, TaskRepository};
pub use service::TaskService;
