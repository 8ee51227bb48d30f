use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

/// `local@domain.segment`: one `@`, no whitespace, at least one dot after the `@`
static EMAIL_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Check an email address against the accepted format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_FORMAT.is_match(email)
}

fn validate_email_format(email: &str) -> Result<(), validator::ValidationError> {
    if !is_valid_email(email) {
        return Err(validator::ValidationError::new("invalid_email")
            .with_message("Please enter a valid email address".into()));
    }
    Ok(())
}

/// User roles
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    /// Full access, including user management
    Admin,
    /// Can create projects and manage tasks
    Manager,
    /// Can view assigned projects and tasks
    #[default]
    User,
}

impl Role {
    /// Capitalized name for display ("Admin", "Manager", "User")
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::User => "User",
        }
    }
}

/// User entity, as persisted under the users key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier, assigned once at creation
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all registered users
    pub username: String,
    /// Unique across all registered users (case-insensitive)
    pub email: String,
    pub role: Role,
    /// Argon2 PHC string; records written before hashing was introduced have none
    #[serde(default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    /// Requester that created this user, if known
    #[serde(default)]
    pub created_by: Option<Uuid>,
}

/// Outward view of a user (no password hash), same field style as the stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            created_by: user.created_by,
        }
    }
}

/// Candidate for user creation.
///
/// Presence of the text fields is checked by the intake engine; the derive
/// covers format and length rules.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateUser {
    #[serde(default)]
    #[validate(length(max = 100, message = "First name cannot exceed 100 characters"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Last name cannot exceed 100 characters"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "Username cannot exceed 50 characters"))]
    pub username: String,
    #[serde(default)]
    #[validate(
        custom(function = "validate_email_format"),
        length(max = 255, message = "Email cannot exceed 255 characters")
    )]
    pub email: String,
    pub role: Option<Role>,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

impl User {
    /// Build a user from a creation candidate. Text fields are stored trimmed.
    pub fn new(
        input: &CreateUser,
        role: Role,
        password_hash: String,
        created_by: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            username: input.username.trim().to_string(),
            email: input.email.trim().to_string(),
            role,
            password_hash,
            created_at: Utc::now(),
            created_by,
        }
    }

    /// "First Last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
