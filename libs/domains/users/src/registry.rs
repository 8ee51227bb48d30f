use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::Display;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::store::UserStore;

/// Which unique field collided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConflictField {
    Username,
    Email,
}

/// Result of a uniqueness pre-check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub available: bool,
    pub conflict_field: Option<ConflictField>,
}

impl Availability {
    pub fn free() -> Self {
        Self {
            available: true,
            conflict_field: None,
        }
    }

    pub fn taken(field: ConflictField) -> Self {
        Self {
            available: false,
            conflict_field: Some(field),
        }
    }
}

/// Username match is exact; email match ignores ASCII case. Username wins ties.
fn find_conflict(users: &[User], username: &str, email: &str) -> Option<ConflictField> {
    if users.iter().any(|u| u.username == username) {
        return Some(ConflictField::Username);
    }
    if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
        return Some(ConflictField::Email);
    }
    None
}

/// Authoritative username/email index over the user store.
///
/// `register` holds a single async mutex across load, check, append and
/// replace, so two registrations racing on the same username cannot both
/// succeed. Reads do not take the lock.
pub struct UniquenessRegistry<S: UserStore> {
    store: Arc<S>,
    write_lock: Mutex<()>,
}

impl<S: UserStore> UniquenessRegistry<S> {
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<S>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All registered users, in listing order
    pub async fn users(&self) -> UserResult<Vec<User>> {
        self.store.load().await
    }

    /// Look up a registered user by id
    pub async fn find(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.store.load().await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    /// Non-binding pre-check; `register` re-checks under the lock
    #[instrument(skip(self))]
    pub async fn check_available(&self, username: &str, email: &str) -> UserResult<Availability> {
        let users = self.store.load().await?;
        Ok(match find_conflict(&users, username.trim(), email.trim()) {
            Some(field) => Availability::taken(field),
            None => Availability::free(),
        })
    }

    /// Atomically check uniqueness and append the user to the store
    #[instrument(skip(self, user), fields(user_id = %user.id, username = %user.username))]
    pub async fn register(&self, user: User) -> UserResult<User> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.store.load().await?;

        if let Some(field) = find_conflict(&users, &user.username, &user.email) {
            let value = match field {
                ConflictField::Username => user.username,
                ConflictField::Email => user.email,
            };
            warn!(%field, "Registration rejected: duplicate");
            return Err(UserError::Duplicate { field, value });
        }

        users.push(user.clone());
        self.store.replace(users).await?;

        info!(user_id = %user.id, role = %user.role, "Registered user");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateUser, Role};
    use crate::store::{InMemoryUserStore, MockUserStore};

    fn user(username: &str, email: &str) -> User {
        let input = CreateUser {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            role: Some(Role::User),
            password: "secret1".to_string(),
        };
        User::new(&input, Role::User, "hash".to_string(), None)
    }

    #[tokio::test]
    async fn test_register_twice_conflicts_on_username() {
        let registry = UniquenessRegistry::new(InMemoryUserStore::new());

        registry.register(user("bob", "bob@x.com")).await.unwrap();
        let result = registry.register(user("bob", "bob@x.com")).await;

        assert!(matches!(
            result,
            Err(UserError::Duplicate { field: ConflictField::Username, ref value }) if value == "bob"
        ));
        assert_eq!(registry.users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_conflicts_on_email_case_insensitively() {
        let registry = UniquenessRegistry::new(InMemoryUserStore::new());

        registry.register(user("bob", "bob@x.com")).await.unwrap();
        let result = registry.register(user("robert", "BOB@X.COM")).await;

        assert!(matches!(
            result,
            Err(UserError::Duplicate { field: ConflictField::Email, .. })
        ));
    }

    #[tokio::test]
    async fn test_check_available_reports_conflict_field() {
        let registry = UniquenessRegistry::new(InMemoryUserStore::new());
        registry.register(user("alice", "alice@example.com")).await.unwrap();

        assert_eq!(
            registry.check_available("alice", "other@example.com").await.unwrap(),
            Availability::taken(ConflictField::Username)
        );
        assert_eq!(
            registry.check_available("alicia", "alice@example.com").await.unwrap(),
            Availability::taken(ConflictField::Email)
        );
        assert_eq!(
            registry.check_available("alice", "alice@example.com").await.unwrap(),
            Availability::taken(ConflictField::Username)
        );
        assert_eq!(
            registry.check_available("alicia", "alicia@example.com").await.unwrap(),
            Availability::free()
        );
    }

    #[tokio::test]
    async fn test_check_available_has_no_side_effects() {
        let store = InMemoryUserStore::new();
        let registry = UniquenessRegistry::new(store.clone());

        registry.check_available("ghost", "ghost@example.com").await.unwrap();

        assert_eq!(store.raw().await, None);
    }

    #[tokio::test]
    async fn test_users_in_registration_order_and_find() {
        let registry = UniquenessRegistry::new(InMemoryUserStore::new());
        let first = registry.register(user("zed", "zed@example.com")).await.unwrap();
        registry.register(user("amy", "amy@example.com")).await.unwrap();

        let names: Vec<_> = registry
            .users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["zed", "amy"]);

        let found = registry.find(first.id).await.unwrap();
        assert_eq!(found.map(|u| u.username), Some("zed".to_string()));
        assert!(registry.find(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_admit_exactly_one() {
        let registry = Arc::new(UniquenessRegistry::new(InMemoryUserStore::new()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    registry
                        .register(user("bob", &format!("bob{}@x.com", i)))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(UserError::Duplicate { field, .. }) => {
                    assert_eq!(field, ConflictField::Username)
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(registry.users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced_not_swallowed() {
        let mut store = MockUserStore::new();
        store
            .expect_load()
            .returning(|| Err(UserError::StoreUnavailable("connection refused".to_string())));
        store.expect_replace().never();

        let registry = UniquenessRegistry::new(store);

        let check = registry.check_available("bob", "bob@x.com").await;
        assert!(matches!(check, Err(UserError::StoreUnavailable(_))));

        let register = registry.register(user("bob", "bob@x.com")).await;
        assert!(matches!(register, Err(e) if e.is_infrastructure()));
    }

    #[tokio::test]
    async fn test_failed_write_reports_store_error() {
        let mut store = MockUserStore::new();
        store.expect_load().returning(|| Ok(Vec::new()));
        store
            .expect_replace()
            .times(1)
            .returning(|_| Err(UserError::StoreUnavailable("read-only replica".to_string())));

        let registry = UniquenessRegistry::new(store);
        let result = registry.register(user("bob", "bob@x.com")).await;

        assert!(matches!(result, Err(UserError::StoreUnavailable(_))));
    }
}
