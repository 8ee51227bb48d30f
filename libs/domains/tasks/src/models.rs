use chrono::{DateTime, NaiveDate, Utc};
use domain_projects::{Status, non_blank, span_days};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Task entity, always nested under a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned once at creation
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: Status,
    pub hours_consumed: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Eligible user the task is assigned to, if any
    pub assignee_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Candidate for task creation
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateTask {
    pub project_id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(max = 200, message = "Task name cannot exceed 200 characters"))]
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
    pub assignee_id: Option<Uuid>,
}

impl Task {
    /// Build a task from an accepted candidate. Text fields are stored trimmed.
    pub fn new(input: &CreateTask, project_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            project_id,
            name: input.name.trim().to_string(),
            description: non_blank(input.description.as_deref()),
            status: input.status,
            hours_consumed: input.hours_consumed,
            start_date: input.start_date,
            end_date: input.end_date,
            assignee_id: input.assignee_id,
            created_at: Utc::now(),
        }
    }

    pub fn duration_days(&self) -> Option<i64> {
        span_days(self.start_date, self.end_date)
    }
}
