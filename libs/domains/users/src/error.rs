use thiserror::Error;
use uuid::Uuid;

use crate::registry::ConflictField;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("A user with {field} '{value}' already exists")]
    Duplicate { field: ConflictField, value: String },

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Malformed data stored under '{key}': {details}")]
    MalformedData { key: String, details: String },
}

impl UserError {
    /// Whether this error comes from the backing store or hashing rather than the request
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            UserError::PasswordHash(_)
                | UserError::StoreUnavailable(_)
                | UserError::MalformedData { .. }
        )
    }
}

pub type UserResult<T> = Result<T, UserError>;

impl From<redis::RedisError> for UserError {
    fn from(err: redis::RedisError) -> Self {
        UserError::StoreUnavailable(err.to_string())
    }
}
