use async_trait::async_trait;
use redis::AsyncCommands;
use redis::Client;
use redis::aio::ConnectionManager;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Key the user collection lives under unless configured otherwise
pub const USERS_KEY: &str = "users";

/// Key-value backing store for the user collection.
///
/// The whole collection is stored as one JSON array under a single key: reads
/// load all of it, writes replace all of it. An absent key is an empty
/// collection. Atomicity of check-and-insert is the registry's job, not the
/// store's.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Load every stored user, in listing order
    async fn load(&self) -> UserResult<Vec<User>>;

    /// Replace the stored collection wholesale
    async fn replace(&self, users: Vec<User>) -> UserResult<()>;
}

fn decode_users(key: &str, raw: Option<&str>) -> UserResult<Vec<User>> {
    match raw {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw).map_err(|e| UserError::MalformedData {
            key: key.to_string(),
            details: e.to_string(),
        }),
    }
}

fn encode_users(key: &str, users: &[User]) -> UserResult<String> {
    serde_json::to_string(users).map_err(|e| UserError::MalformedData {
        key: key.to_string(),
        details: e.to_string(),
    })
}

/// In-memory key-value store (for development/testing)
///
/// Holds the same serialized document a remote store would, so decoding
/// failures behave identically.
#[derive(Debug, Clone)]
pub struct InMemoryUserStore {
    key: String,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::with_key(USERS_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Start with an existing collection
    pub fn with_users(users: &[User]) -> UserResult<Self> {
        let raw = encode_users(USERS_KEY, users)?;
        Ok(Self::with_raw(raw))
    }

    /// Start with a raw stored document, which need not be valid JSON
    pub fn with_raw(raw: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(USERS_KEY.to_string(), raw.into());
        Self {
            key: USERS_KEY.to_string(),
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw document currently stored under the key
    pub async fn raw(&self) -> Option<String> {
        self.entries.read().await.get(&self.key).cloned()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn load(&self) -> UserResult<Vec<User>> {
        let entries = self.entries.read().await;
        decode_users(&self.key, entries.get(&self.key).map(String::as_str))
    }

    async fn replace(&self, users: Vec<User>) -> UserResult<()> {
        let raw = encode_users(&self.key, &users)?;
        self.entries.write().await.insert(self.key.clone(), raw);
        debug!(key = %self.key, count = users.len(), "Replaced stored users");
        Ok(())
    }
}

/// Redis-backed store: `GET`/`SET` of the JSON document under the key
#[derive(Clone)]
pub struct RedisUserStore {
    redis: ConnectionManager,
    key: String,
}

impl RedisUserStore {
    pub fn new(redis: ConnectionManager, key: impl Into<String>) -> Self {
        Self {
            redis,
            key: key.into(),
        }
    }

    /// Connect and verify the server answers `PING`
    pub async fn connect(url: &str, key: impl Into<String>) -> UserResult<Self> {
        info!("Connecting user store to Redis at {}", url);

        let client = Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        Ok(Self::new(manager, key))
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl UserStore for RedisUserStore {
    #[instrument(skip(self), fields(key = %self.key))]
    async fn load(&self) -> UserResult<Vec<User>> {
        let mut conn = self.redis.clone();
        let raw: Option<String> = conn.get(&self.key).await?;
        decode_users(&self.key, raw.as_deref())
    }

    #[instrument(skip(self, users), fields(key = %self.key, count = users.len()))]
    async fn replace(&self, users: Vec<User>) -> UserResult<()> {
        let raw = encode_users(&self.key, &users)?;
        let mut conn = self.redis.clone();
        conn.set::<_, _, ()>(&self.key, raw).await?;
        Ok(())
    }
}
