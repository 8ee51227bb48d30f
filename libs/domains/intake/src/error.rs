use chrono::NaiveDate;
use domain_projects::ProjectError;
use domain_tasks::TaskError;
use domain_users::{ConflictField, Role, UserError};
use serde::Serialize;
use strum::Display;
use thiserror::Error;
use uuid::Uuid;

/// What kind of entity a reference on a candidate points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReferenceKind {
    Manager,
    Project,
    Assignee,
}

/// Why a candidate was rejected. Only the first violated rule is reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields: {field} is required")]
    MissingField { field: &'static str },

    #[error("Invalid {field}: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("End date {end} cannot be before start date {start}")]
    DateOrder { start: NaiveDate, end: NaiveDate },

    #[error("A user with {field} '{value}' already exists")]
    Duplicate { field: ConflictField, value: String },

    #[error("User {candidate} is not an eligible {reference} for requester role {requester}")]
    IneligibleAssignee {
        reference: ReferenceKind,
        candidate: Uuid,
        requester: Role,
    },

    #[error("{kind} not found: {id}")]
    NotFound { kind: ReferenceKind, id: Uuid },

    #[error("Role {role} is not permitted to {action}")]
    PermissionDenied { role: Role, action: &'static str },
}

impl ValidationError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "missing_field",
            ValidationError::InvalidFormat { .. } => "invalid_format",
            ValidationError::DateOrder { .. } => "date_order",
            ValidationError::Duplicate { .. } => "duplicate",
            ValidationError::IneligibleAssignee { .. } => "ineligible_assignee",
            ValidationError::NotFound { .. } => "not_found",
            ValidationError::PermissionDenied { .. } => "permission_denied",
        }
    }
}

/// Failures of the stores behind the intake path, as opposed to rejections
#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error(transparent)]
    Users(UserError),

    #[error(transparent)]
    Projects(#[from] ProjectError),

    #[error(transparent)]
    Tasks(#[from] TaskError),
}

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Rejected: {0}")]
    Rejected(#[from] ValidationError),

    #[error("Infrastructure failure: {0}")]
    Infrastructure(#[from] InfrastructureError),
}

impl IntakeError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, IntakeError::Rejected(_))
    }

    /// The rejection reason, if this is a rejection
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            IntakeError::Rejected(err) => Some(err),
            IntakeError::Infrastructure(_) => None,
        }
    }
}

pub type IntakeResult<T> = Result<T, IntakeError>;

/// A duplicate found by the registry is a rejection; anything else is infrastructure
impl From<UserError> for IntakeError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Duplicate { field, value } => {
                IntakeError::Rejected(ValidationError::Duplicate { field, value })
            }
            other => IntakeError::Infrastructure(InfrastructureError::Users(other)),
        }
    }
}

impl From<ProjectError> for IntakeError {
    fn from(err: ProjectError) -> Self {
        IntakeError::Infrastructure(err.into())
    }
}

impl From<TaskError> for IntakeError {
    fn from(err: TaskError) -> Self {
        IntakeError::Infrastructure(err.into())
    }
}
