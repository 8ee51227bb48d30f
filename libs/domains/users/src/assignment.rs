//! Role-based assignment rules.
//!
//! Who a requester may assign work to depends only on the requester's role and
//! the candidate's role. Results keep the order of the input listing.

use crate::models::{Role, User};

/// Users the requester may set as a task assignee.
///
/// - admin: managers, then users (each group in listing order)
/// - manager: users only
/// - anyone else: nobody
pub fn eligible_assignees(requester: Role, users: &[User]) -> Vec<&User> {
    match requester {
        Role::Admin => users
            .iter()
            .filter(|u| u.role == Role::Manager)
            .chain(users.iter().filter(|u| u.role == Role::User))
            .collect(),
        Role::Manager => users.iter().filter(|u| u.role == Role::User).collect(),
        Role::User => Vec::new(),
    }
}

/// Users eligible to manage a project. Independent of who is asking.
pub fn eligible_managers(users: &[User]) -> Vec<&User> {
    users.iter().filter(|u| is_eligible_manager(u)).collect()
}

pub fn is_eligible_assignee(requester: Role, candidate: &User) -> bool {
    match requester {
        Role::Admin => matches!(candidate.role, Role::Manager | Role::User),
        Role::Manager => candidate.role == Role::User,
        Role::User => false,
    }
}

pub fn is_eligible_manager(candidate: &User) -> bool {
    candidate.role == Role::Manager
}
