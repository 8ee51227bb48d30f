use domain_users::{Role, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The principal on whose behalf an operation runs.
///
/// Passed explicitly into every engine, resolver and service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub id: Uuid,
    pub role: Role,
}

impl Requester {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn admin(id: Uuid) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn manager(id: Uuid) -> Self {
        Self::new(id, Role::Manager)
    }

    pub fn user(id: Uuid) -> Self {
        Self::new(id, Role::User)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Requester {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}
