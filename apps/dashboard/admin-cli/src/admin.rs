//! Command implementations over the intake service

use domain_intake::{IntakeService, Requester};
use domain_projects::{Badge, InMemoryProjectRepository, classify, classify_role};
use domain_tasks::InMemoryTaskRepository;
use domain_users::{Availability, CreateUser, UniquenessRegistry, UserResponse, UserStore};
use eyre::Result;
use serde::Serialize;
use tracing::info;

/// Badge lookup result, printed as JSON
#[derive(Debug, Serialize)]
pub struct BadgeReport {
    pub value: Option<String>,
    pub badge: Badge,
}

pub fn status_badge(status: Option<String>) -> BadgeReport {
    let badge = classify(status.as_deref());
    BadgeReport {
        value: status,
        badge,
    }
}

pub fn role_badge(role: Option<String>) -> BadgeReport {
    let badge = classify_role(role.as_deref());
    BadgeReport { value: role, badge }
}

pub struct Admin<S: UserStore> {
    intake: IntakeService<S, InMemoryProjectRepository, InMemoryTaskRepository>,
    requester: Requester,
}

impl<S: UserStore> Admin<S> {
    pub fn new(store: S, requester: Requester) -> Self {
        Self {
            intake: IntakeService::new(
                UniquenessRegistry::new(store),
                InMemoryProjectRepository::new(),
                InMemoryTaskRepository::new(),
            ),
            requester,
        }
    }

    pub async fn users(&self) -> Result<Vec<UserResponse>> {
        Ok(self.intake.list_users(&self.requester).await?)
    }

    pub async fn create_user(&self, input: CreateUser) -> Result<UserResponse> {
        let user = self.intake.create_user(input, &self.requester).await?;
        info!(user_id = %user.id, username = %user.username, "Created user");
        Ok(user)
    }

    pub async fn check(&self, username: &str, email: &str) -> Result<Availability> {
        Ok(self
            .intake
            .registry()
            .check_available(username, email)
            .await?)
    }

    pub async fn assignees(&self) -> Result<Vec<UserResponse>> {
        Ok(self.intake.eligible_assignees(&self.requester).await?)
    }

    pub async fn managers(&self) -> Result<Vec<UserResponse>> {
        Ok(self.intake.eligible_managers().await?)
    }
}
