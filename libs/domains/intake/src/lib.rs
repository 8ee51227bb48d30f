//! Intake Domain
//!
//! The single path by which projects, tasks and users come into existence:
//! a candidate is validated against the requester and the current state,
//! then committed to its repository (or, for users, registered atomically).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  IntakeService   │  ← validate, then commit
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │ ValidationEngine │  ← ordered, side-effect free checks
//! └────────┬─────────┘
//!          │
//! ┌────────▼───────────────────────────────┐
//! │ UniquenessRegistry │ ProjectRepository │  ← users / projects / tasks domains
//! └────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_intake::{IntakeService, Requester};
//! use domain_projects::InMemoryProjectRepository;
//! use domain_tasks::InMemoryTaskRepository;
//! use domain_users::{CreateUser, InMemoryUserStore, Role, UniquenessRegistry};
//!
//! # async fn example() -> domain_intake::IntakeResult<()> {
//! let service = IntakeService::new(
//!     UniquenessRegistry::new(InMemoryUserStore::new()),
//!     InMemoryProjectRepository::new(),
//!     InMemoryTaskRepository::new(),
//! );
//! let admin = Requester::admin(uuid::Uuid::now_v7());
//! let manager = service
//!     .create_user(
//!         CreateUser {
//!             first_name: "Ada".into(),
//!             last_name: "Lovelace".into(),
//!             username: "ada".into(),
//!             email: "ada@example.com".into(),
//!             role: Some(Role::Manager),
//!             password: "secret1".into(),
//!         },
//!         &admin,
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod service;

pub use context::Requester;
pub use engine::{Candidate, Validated, ValidationEngine};
pub use error::{InfrastructureError, IntakeError, IntakeResult, ReferenceKind, ValidationError};
pub use service::IntakeService;
