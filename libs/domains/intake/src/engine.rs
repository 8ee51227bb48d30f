//! Validation engine for project, task and user candidates.
//!
//! Checks run in a fixed order and stop at the first violation:
//!
//! 0. requester authorization (users only)
//! 1. required fields
//! 2. field formats (lowest field name first when several fail)
//! 3. date order
//! 4. references
//! 5. uniqueness (users only)
//! 6. eligibility
//!
//! Validation never writes. The accepted entity is handed back for the
//! caller to commit.

use chrono::NaiveDate;
use domain_projects::{CreateProject, Project, ProjectRepository};
use domain_tasks::{CreateTask, Task};
use domain_users::assignment::{is_eligible_assignee, is_eligible_manager};
use domain_users::password::hash_password;
use domain_users::{ConflictField, CreateUser, UniquenessRegistry, User, UserStore};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::context::Requester;
use crate::error::{IntakeResult, ReferenceKind, ValidationError};

/// Something submitted for creation
#[derive(Debug, Clone)]
pub enum Candidate {
    Project(CreateProject),
    Task(CreateTask),
    User(CreateUser),
}

/// An accepted entity, ready to commit
#[derive(Debug, Clone)]
pub enum Validated {
    Project(Project),
    Task(Task),
    User(User),
}

pub struct ValidationEngine<S: UserStore, P: ProjectRepository> {
    registry: Arc<UniquenessRegistry<S>>,
    projects: Arc<P>,
}

impl<S: UserStore, P: ProjectRepository> ValidationEngine<S, P> {
    pub fn new(registry: Arc<UniquenessRegistry<S>>, projects: Arc<P>) -> Self {
        Self { registry, projects }
    }

    pub async fn validate(
        &self,
        candidate: Candidate,
        requester: &Requester,
    ) -> IntakeResult<Validated> {
        match candidate {
            Candidate::Project(input) => self
                .validate_project(input, requester)
                .await
                .map(Validated::Project),
            Candidate::Task(input) => self
                .validate_task(input, requester)
                .await
                .map(Validated::Task),
            Candidate::User(input) => self
                .validate_user(input, requester)
                .await
                .map(Validated::User),
        }
    }

    #[instrument(skip(self, input), fields(requester_id = %requester.id))]
    pub async fn validate_project(
        &self,
        input: CreateProject,
        requester: &Requester,
    ) -> IntakeResult<Project> {
        let input = CreateProject {
            name: input.name.trim().to_string(),
            ..input
        };

        require_text("name", &input.name)?;
        let manager_id = input
            .manager_id
            .ok_or(ValidationError::MissingField { field: "manager_id" })?;

        let mut violations = derive_violations(input.validate());
        check_hours(input.hours_consumed, &mut violations);
        first_violation(violations)?;

        check_date_order(input.start_date, input.end_date)?;

        let manager = self
            .registry
            .find(manager_id)
            .await?
            .ok_or(ValidationError::NotFound {
                kind: ReferenceKind::Manager,
                id: manager_id,
            })?;

        if !is_eligible_manager(&manager) {
            return Err(ValidationError::IneligibleAssignee {
                reference: ReferenceKind::Manager,
                candidate: manager_id,
                requester: requester.role,
            }
            .into());
        }

        debug!(%manager_id, "Project candidate accepted");
        Ok(Project::new(&input, manager_id))
    }

    #[instrument(skip(self, input), fields(requester_id = %requester.id))]
    pub async fn validate_task(
        &self,
        input: CreateTask,
        requester: &Requester,
    ) -> IntakeResult<Task> {
        let input = CreateTask {
            name: input.name.trim().to_string(),
            ..input
        };

        let project_id = input
            .project_id
            .ok_or(ValidationError::MissingField { field: "project_id" })?;
        require_text("name", &input.name)?;

        let mut violations = derive_violations(input.validate());
        check_hours(input.hours_consumed, &mut violations);
        first_violation(violations)?;

        check_date_order(input.start_date, input.end_date)?;

        if !self.projects.exists(project_id).await? {
            return Err(ValidationError::NotFound {
                kind: ReferenceKind::Project,
                id: project_id,
            }
            .into());
        }

        if let Some(assignee_id) = input.assignee_id {
            let assignee = self
                .registry
                .find(assignee_id)
                .await?
                .ok_or(ValidationError::NotFound {
                    kind: ReferenceKind::Assignee,
                    id: assignee_id,
                })?;

            if !is_eligible_assignee(requester.role, &assignee) {
                return Err(ValidationError::IneligibleAssignee {
                    reference: ReferenceKind::Assignee,
                    candidate: assignee_id,
                    requester: requester.role,
                }
                .into());
            }
        }

        debug!(%project_id, "Task candidate accepted");
        Ok(Task::new(&input, project_id))
    }

    /// Accepts a user candidate and returns the user with its password hashed.
    /// The registry is only read here; `register` commits.
    #[instrument(skip(self, input), fields(requester_id = %requester.id))]
    pub async fn validate_user(
        &self,
        input: CreateUser,
        requester: &Requester,
    ) -> IntakeResult<User> {
        if !requester.is_admin() {
            return Err(ValidationError::PermissionDenied {
                role: requester.role,
                action: "create users",
            }
            .into());
        }

        let input = CreateUser {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            username: input.username.trim().to_string(),
            email: input.email.trim().to_string(),
            ..input
        };

        require_text("first_name", &input.first_name)?;
        require_text("last_name", &input.last_name)?;
        require_text("username", &input.username)?;
        require_text("email", &input.email)?;
        let role = input
            .role
            .ok_or(ValidationError::MissingField { field: "role" })?;
        if input.password.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "password" }.into());
        }

        first_violation(derive_violations(input.validate()))?;

        let availability = self
            .registry
            .check_available(&input.username, &input.email)
            .await?;
        if let Some(field) = availability.conflict_field {
            let value = match field {
                ConflictField::Username => input.username.clone(),
                ConflictField::Email => input.email.clone(),
            };
            return Err(ValidationError::Duplicate { field, value }.into());
        }

        let password_hash = hash_password(&input.password)?;

        debug!(username = %input.username, %role, "User candidate accepted");
        Ok(User::new(&input, role, password_hash, Some(requester.id)))
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

/// One `(field, reason)` pair per failing field from the derive rules
fn derive_violations(result: Result<(), validator::ValidationErrors>) -> Vec<(String, String)> {
    let Err(errors) = result else {
        return Vec::new();
    };

    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let reason = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), reason)
            })
        })
        .collect()
}

fn check_hours(hours: f64, violations: &mut Vec<(String, String)>) {
    if !hours.is_finite() {
        violations.push((
            "hours_consumed".to_string(),
            "Hours consumed must be a finite number".to_string(),
        ));
    }
}

/// Field errors arrive in hash order; report the lowest field name
fn first_violation(mut violations: Vec<(String, String)>) -> Result<(), ValidationError> {
    violations.sort_by(|a, b| a.0.cmp(&b.0));
    match violations.into_iter().next() {
        Some((field, reason)) => Err(ValidationError::InvalidFormat { field, reason }),
        None => Ok(()),
    }
}

fn check_date_order(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::DateOrder { start, end }),
        _ => Ok(()),
    }
}
