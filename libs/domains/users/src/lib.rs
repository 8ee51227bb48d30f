//! Users Domain
//!
//! User model, password hashing, the key-value user store, the uniqueness
//! registry and the role-based assignment rules.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │   Registry   │   │  Assignment  │  ← uniqueness index / role rules
//! └──────┬───────┘   └──────┬───────┘
//!        │                  │
//! ┌──────▼───────┐          │
//! │    Store     │          │          ← key-value persistence (trait + impls)
//! └──────┬───────┘          │
//!        │                  │
//! ┌──────▼──────────────────▼───┐
//! │            Models           │      ← User, Role, CreateUser
//! └─────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{InMemoryUserStore, UniquenessRegistry};
//!
//! # async fn example() -> domain_users::UserResult<()> {
//! let registry = UniquenessRegistry::new(InMemoryUserStore::new());
//! let availability = registry.check_available("bob", "bob@x.com").await?;
//! assert!(availability.available);
//! # Ok(())
//! # }
//! ```

pub mod assignment;
pub mod error;
pub mod models;
pub mod password;
pub mod registry;
pub mod store;

// Re-export commonly used types
pub use assignment::{eligible_assignees, eligible_managers};
pub use error::{UserError, UserResult};
pub use models::{CreateUser, Role, User, UserResponse};
pub use registry::{Availability, ConflictField, UniquenessRegistry};
pub use store::{InMemoryUserStore, RedisUserStore, USERS_KEY, UserStore};
