use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

/// Work status shared by projects and tasks
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Status {
    /// Not started yet
    #[default]
    Pending,
    /// Being worked on
    InProgress,
    /// Finished
    Completed,
    /// Paused
    OnHold,
}

/// Whole days from `start` to `end`, when both are known
pub fn span_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<i64> {
    match (start, end) {
        (Some(start), Some(end)) => Some((end - start).num_days()),
        _ => None,
    }
}

/// Trimmed text, or None when nothing is left
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier, assigned once at creation
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: Status,
    pub hours_consumed: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// User with role = manager responsible for the project
    pub manager_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Candidate for project creation.
///
/// `manager_id` is optional here so that a missing manager is reported as a
/// missing field rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProject {
    #[serde(default)]
    #[validate(length(max = 100, message = "Project name cannot exceed 100 characters"))]
    pub name: String,
    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Hours consumed cannot be negative"))]
    pub hours_consumed: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager_id: Option<Uuid>,
}

/// Query filters for listing projects
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectFilter {
    pub status: Option<Status>,
    pub manager_id: Option<Uuid>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self {
            status: None,
            manager_id: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(status) = self.status {
            if project.status != status {
                return false;
            }
        }
        if let Some(manager_id) = self.manager_id {
            if project.manager_id != manager_id {
                return false;
            }
        }
        true
    }
}

impl Project {
    /// Build a project from an accepted candidate. Text fields are stored trimmed.
    pub fn new(input: &CreateProject, manager_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            description: non_blank(input.description.as_deref()),
            status: input.status,
            hours_consumed: input.hours_consumed,
            start_date: input.start_date,
            end_date: input.end_date,
            manager_id,
            created_at: Utc::now(),
        }
    }

    pub fn duration_days(&self) -> Option<i64> {
        span_days(self.start_date, self.end_date)
    }
}
