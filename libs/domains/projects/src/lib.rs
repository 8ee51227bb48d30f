//! Projects Domain
//!
//! Project model, the work `Status` shared with tasks, badge classification,
//! and the project repository and read service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Read paths (get, filtered list)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums, badges
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_projects::{InMemoryProjectRepository, ProjectFilter, ProjectService};
//!
//! # async fn example() -> domain_projects::ProjectResult<()> {
//! let service = ProjectService::new(InMemoryProjectRepository::new());
//! let projects = service.list_projects(ProjectFilter::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod badge;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use badge::{Badge, classify, classify_role};
pub use error::{ProjectError, ProjectResult};
pub use models::{CreateProject, Project, ProjectFilter, Status, non_blank, span_days};
pub use repository::{InMemoryProjectRepository, ProjectRepository};
pub use service::ProjectService;
