//! Integration tests for the Redis-backed user store
//!
//! These start a real Redis via testcontainers and therefore need Docker.
//! Run with `cargo test -p domain_users -- --ignored`.

use domain_users::*;
use redis::AsyncCommands;
use std::sync::Arc;
use test_utils::{TestDataBuilder, TestRedis, assertions::*};

fn candidate(builder: &TestDataBuilder, base: &str, role: Role) -> CreateUser {
    CreateUser {
        first_name: base.to_string(),
        last_name: "Integration".to_string(),
        username: builder.username(base),
        email: builder.email(base),
        role: Some(role),
        password: "secret1".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_register_persists_json_array_under_key() {
    let redis = TestRedis::new().await;
    let store = RedisUserStore::connect(redis.connection_string(), USERS_KEY)
        .await
        .unwrap();
    let registry = UniquenessRegistry::new(store);
    let builder = TestDataBuilder::from_test_name("redis_register");

    let input = candidate(&builder, "alice", Role::Manager);
    let user = User::new(&input, Role::Manager, "hash".to_string(), None);
    registry.register(user.clone()).await.unwrap();

    let mut conn = redis.connection();
    let raw: String = conn.get(USERS_KEY).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["username"], input.username.as_str());
    assert_eq!(value[0]["role"], "manager");

    let loaded = registry.users().await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_uuid_eq(loaded[0].id, user.id, "stored user id");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_detected_against_stored_collection() {
    let redis = TestRedis::new().await;
    let builder = TestDataBuilder::from_test_name("redis_duplicate");
    let input = candidate(&builder, "bob", Role::User);

    let first = UniquenessRegistry::new(
        RedisUserStore::connect(redis.connection_string(), USERS_KEY)
            .await
            .unwrap(),
    );
    first
        .register(User::new(&input, Role::User, "hash".to_string(), None))
        .await
        .unwrap();

    // A second registry over the same key sees the persisted collection
    let second = UniquenessRegistry::new(
        RedisUserStore::connect(redis.connection_string(), USERS_KEY)
            .await
            .unwrap(),
    );
    let availability = second
        .check_available(&input.username, "someone-else@example.com")
        .await
        .unwrap();
    assert_eq!(availability, Availability::taken(ConflictField::Username));

    let err = assert_err(
        second
            .register(User::new(&input, Role::User, "hash".to_string(), None))
            .await,
        "second registration",
    );
    assert!(matches!(err, UserError::Duplicate { field: ConflictField::Username, .. }));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_malformed_document_is_an_infrastructure_error() {
    let redis = TestRedis::new().await;
    let mut conn = redis.connection();
    conn.set::<_, _, ()>(USERS_KEY, "[{\"id\": 42}]").await.unwrap();

    let store = RedisUserStore::connect(redis.connection_string(), USERS_KEY)
        .await
        .unwrap();
    let err = assert_err(store.load().await, "load malformed users");

    assert!(err.is_infrastructure());
    assert!(matches!(err, UserError::MalformedData { .. }));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concurrent_registrations_through_one_registry() {
    let redis = TestRedis::new().await;
    let store = RedisUserStore::connect(redis.connection_string(), USERS_KEY)
        .await
        .unwrap();
    let registry = Arc::new(UniquenessRegistry::new(store));
    let builder = TestDataBuilder::from_test_name("redis_race");

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let mut input = candidate(&builder, "racer", Role::User);
            input.email = format!("racer{}@example.com", i);
            tokio::spawn(async move {
                registry
                    .register(User::new(&input, Role::User, "hash".to_string(), None))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(registry.users().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unreachable_redis_is_reported() {
    let result = RedisUserStore::connect("redis://127.0.0.1:1", USERS_KEY).await;
    let err = assert_err(result.map(|_| ()), "connect to closed port");
    assert!(matches!(err, UserError::StoreUnavailable(_)));
}
