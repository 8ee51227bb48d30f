//! Shared test utilities for the dashboard domain crates
//!
//! - `TestDataBuilder`: deterministic ids, names, usernames, emails and dates
//! - `assertions`: assertion helpers with readable failure messages
//! - `TestRedis`: Redis container with automatic cleanup (feature: "redis")
//!
//! # Usage
//!
//! ```rust
//! use test_utils::TestDataBuilder;
//!
//! let builder = TestDataBuilder::from_test_name("register_user");
//! let manager_id = builder.id("manager");
//! let username = builder.username("alice");
//! assert_eq!(manager_id, builder.id("manager"));
//! assert!(builder.email("alice").ends_with("@example.com"));
//! ```
//!
//! ## Redis Testing
//!
//! Add `features = ["redis"]` to your dev-dependencies, then:
//!
//! ```rust,ignore
//! use test_utils::TestRedis;
//!
//! #[tokio::test]
//! async fn my_redis_test() {
//!     let redis = TestRedis::new().await;
//!     let url = redis.connection_string();
//! }
//! ```

use chrono::NaiveDate;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

#[cfg(feature = "redis")]
mod redis;

#[cfg(feature = "redis")]
pub use redis::TestRedis;

/// Builder for test data with deterministic randomization
///
/// The same seed and label always produce the same value, so failures
/// reproduce exactly.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Deterministic UUID for a label; different labels give different ids
    pub fn id(&self, label: &str) -> Uuid {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        label.hash(&mut hasher);
        let high = hasher.finish();
        label.len().hash(&mut hasher);
        let low = hasher.finish();

        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&high.to_le_bytes());
        bytes[8..].copy_from_slice(&low.to_le_bytes());
        Uuid::from_bytes(bytes)
    }

    /// Unique name for a resource, e.g. "test-project-12345-main"
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Username unique to this builder, e.g. "alice_3039"
    pub fn username(&self, base: &str) -> String {
        format!("{}_{}", base, self.seed % 10_000)
    }

    /// Email matching [`Self::username`]
    pub fn email(&self, base: &str) -> String {
        format!("{}@example.com", self.username(base))
    }

    /// Calendar date from an ISO `YYYY-MM-DD` literal
    pub fn date(&self, iso: &str) -> NaiveDate {
        NaiveDate::parse_from_str(iso, "%Y-%m-%d")
            .unwrap_or_else(|e| panic!("invalid test date '{}': {}", iso, e))
    }
}

/// Test assertion helpers
pub mod assertions {
    use uuid::Uuid;

    /// Assert that two UUIDs are equal with a nice error message
    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected UUID {}, got {}",
            context, expected, actual
        );
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that a result is Err and hand back the error
    pub fn assert_err<T: std::fmt::Debug, E>(result: Result<T, E>, context: &str) -> E {
        match result {
            Ok(value) => panic!("{}: expected Err, got Ok({:?})", context, value),
            Err(err) => err,
        }
    }
}
