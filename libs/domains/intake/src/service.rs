use domain_projects::{CreateProject, Project, ProjectRepository};
use domain_tasks::{CreateTask, Task, TaskRepository};
use domain_users::{CreateUser, UniquenessRegistry, UserResponse, UserStore, assignment};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::context::Requester;
use crate::engine::ValidationEngine;
use crate::error::{IntakeResult, ValidationError};

/// Validate-then-commit entry points for the dashboard
pub struct IntakeService<S: UserStore, P: ProjectRepository, T: TaskRepository> {
    engine: ValidationEngine<S, P>,
    registry: Arc<UniquenessRegistry<S>>,
    projects: Arc<P>,
    tasks: Arc<T>,
}

impl<S: UserStore, P: ProjectRepository, T: TaskRepository> IntakeService<S, P, T> {
    pub fn new(registry: UniquenessRegistry<S>, projects: P, tasks: T) -> Self {
        Self::from_shared(Arc::new(registry), Arc::new(projects), Arc::new(tasks))
    }

    /// Build a service over components that read services also hold
    pub fn from_shared(
        registry: Arc<UniquenessRegistry<S>>,
        projects: Arc<P>,
        tasks: Arc<T>,
    ) -> Self {
        Self {
            engine: ValidationEngine::new(Arc::clone(&registry), Arc::clone(&projects)),
            registry,
            projects,
            tasks,
        }
    }

    pub fn engine(&self) -> &ValidationEngine<S, P> {
        &self.engine
    }

    pub fn registry(&self) -> &UniquenessRegistry<S> {
        &self.registry
    }

    #[instrument(skip(self, input), fields(requester_id = %requester.id))]
    pub async fn create_project(
        &self,
        input: CreateProject,
        requester: &Requester,
    ) -> IntakeResult<Project> {
        let project = self.engine.validate_project(input, requester).await?;
        let project = self.projects.create(project).await?;

        info!(project_id = %project.id, "Project created");
        Ok(project)
    }

    #[instrument(skip(self, input), fields(requester_id = %requester.id))]
    pub async fn create_task(&self, input: CreateTask, requester: &Requester) -> IntakeResult<Task> {
        let task = self.engine.validate_task(input, requester).await?;
        let task = self.tasks.create(task).await?;

        info!(task_id = %task.id, project_id = %task.project_id, "Task created");
        Ok(task)
    }

    /// Validates, then registers atomically. A duplicate that slipped in
    /// between the two steps is still reported as a duplicate rejection.
    #[instrument(skip(self, input), fields(requester_id = %requester.id))]
    pub async fn create_user(
        &self,
        input: CreateUser,
        requester: &Requester,
    ) -> IntakeResult<UserResponse> {
        let user = self.engine.validate_user(input, requester).await?;
        let user = self.registry.register(user).await?;

        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user.into())
    }

    /// All users in listing order. Admin only.
    #[instrument(skip(self), fields(requester_id = %requester.id))]
    pub async fn list_users(&self, requester: &Requester) -> IntakeResult<Vec<UserResponse>> {
        if !requester.is_admin() {
            return Err(ValidationError::PermissionDenied {
                role: requester.role,
                action: "list users",
            }
            .into());
        }

        let users = self.registry.users().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Users the requester may assign tasks to
    pub async fn eligible_assignees(
        &self,
        requester: &Requester,
    ) -> IntakeResult<Vec<UserResponse>> {
        let users = self.registry.users().await?;
        Ok(assignment::eligible_assignees(requester.role, &users)
            .into_iter()
            .cloned()
            .map(UserResponse::from)
            .collect())
    }

    /// Users who may manage a project
    pub async fn eligible_managers(&self) -> IntakeResult<Vec<UserResponse>> {
        let users = self.registry.users().await?;
        Ok(assignment::eligible_managers(&users)
            .into_iter()
            .cloned()
            .map(UserResponse::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InfrastructureError, IntakeError};
    use domain_projects::InMemoryProjectRepository;
    use domain_tasks::InMemoryTaskRepository;
    use domain_users::{ConflictField, InMemoryUserStore, Role, User, UserError};
    use uuid::Uuid;

    type Service = IntakeService<InMemoryUserStore, InMemoryProjectRepository, InMemoryTaskRepository>;

    fn service_with(store: InMemoryUserStore) -> Service {
        IntakeService::new(
            UniquenessRegistry::new(store),
            InMemoryProjectRepository::new(),
            InMemoryTaskRepository::new(),
        )
    }

    fn seeded(username: &str, role: Role) -> User {
        let input = CreateUser {
            first_name: username.to_string(),
            last_name: "Seed".to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            role: Some(role),
            password: "secret1".to_string(),
        };
        User::new(&input, role, "hash".to_string(), None)
    }

    fn new_user(username: &str, role: Role) -> CreateUser {
        CreateUser {
            first_name: "New".to_string(),
            last_name: "Person".to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            role: Some(role),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_project_then_task() {
        let manager = seeded("managerA", Role::Manager);
        let worker = seeded("userB", Role::User);
        let store = InMemoryUserStore::with_users(&[manager.clone(), worker.clone()]).unwrap();
        let service = service_with(store);
        let admin = Requester::admin(Uuid::now_v7());

        let project = service
            .create_project(
                CreateProject {
                    name: "Apollo".to_string(),
                    manager_id: Some(manager.id),
                    ..Default::default()
                },
                &admin,
            )
            .await
            .unwrap();

        let task = service
            .create_task(
                CreateTask {
                    project_id: Some(project.id),
                    name: "Launch".to_string(),
                    assignee_id: Some(worker.id),
                    ..Default::default()
                },
                &Requester::from(&manager),
            )
            .await
            .unwrap();

        assert_eq!(task.project_id, project.id);
        assert_eq!(task.assignee_id, Some(worker.id));
    }

    #[tokio::test]
    async fn test_rejected_task_is_not_stored() {
        let manager = seeded("managerA", Role::Manager);
        let store = InMemoryUserStore::with_users(&[manager.clone()]).unwrap();
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let service = IntakeService::from_shared(
            Arc::new(UniquenessRegistry::new(store)),
            Arc::clone(&projects),
            Arc::clone(&tasks),
        );
        let admin = Requester::admin(Uuid::now_v7());

        let project = service
            .create_project(
                CreateProject {
                    name: "Apollo".to_string(),
                    manager_id: Some(manager.id),
                    ..Default::default()
                },
                &admin,
            )
            .await
            .unwrap();

        let result = service
            .create_task(
                CreateTask {
                    project_id: Some(project.id),
                    name: "Launch".to_string(),
                    hours_consumed: -3.0,
                    ..Default::default()
                },
                &admin,
            )
            .await;

        assert!(matches!(result, Err(IntakeError::Rejected(_))));
        assert_eq!(tasks.count_by_project(project.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_user_records_creator_and_hides_hash() {
        let service = service_with(InMemoryUserStore::new());
        let admin = Requester::admin(Uuid::now_v7());

        let created = service
            .create_user(new_user("carol", Role::Manager), &admin)
            .await
            .unwrap();

        assert_eq!(created.created_by, Some(admin.id));
        assert_eq!(created.role, Role::Manager);

        let shown = format!("{:?}", created);
        assert!(!shown.contains("password_hash"));
        assert!(!shown.contains("$argon2"));

        let stored = service.registry().find(created.id).await.unwrap().unwrap();
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_second_registration_is_duplicate() {
        let service = service_with(InMemoryUserStore::new());
        let admin = Requester::admin(Uuid::now_v7());

        service
            .create_user(new_user("bob", Role::User), &admin)
            .await
            .unwrap();
        let result = service
            .create_user(new_user("bob", Role::User), &admin)
            .await;

        match result {
            Err(IntakeError::Rejected(ValidationError::Duplicate { field, value })) => {
                assert_eq!(field, ConflictField::Username);
                assert_eq!(value, "bob");
            }
            other => panic!("expected duplicate rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_users_is_admin_only() {
        let service = service_with(
            InMemoryUserStore::with_users(&[
                seeded("managerA", Role::Manager),
                seeded("userB", Role::User),
            ])
            .unwrap(),
        );

        let listed = service
            .list_users(&Requester::admin(Uuid::now_v7()))
            .await
            .unwrap();
        let names: Vec<_> = listed.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["managerA", "userB"]);

        let denied = service.list_users(&Requester::manager(Uuid::now_v7())).await;
        assert!(matches!(
            denied,
            Err(IntakeError::Rejected(ValidationError::PermissionDenied { role: Role::Manager, .. }))
        ));
    }

    #[tokio::test]
    async fn test_eligibility_listings() {
        let service = service_with(
            InMemoryUserStore::with_users(&[
                seeded("root", Role::Admin),
                seeded("userB", Role::User),
                seeded("managerA", Role::Manager),
            ])
            .unwrap(),
        );

        let names = |users: Vec<UserResponse>| -> Vec<String> {
            users.into_iter().map(|u| u.username).collect()
        };

        let admin_view = service
            .eligible_assignees(&Requester::admin(Uuid::now_v7()))
            .await
            .unwrap();
        assert_eq!(names(admin_view), vec!["managerA", "userB"]);

        let manager_view = service
            .eligible_assignees(&Requester::manager(Uuid::now_v7()))
            .await
            .unwrap();
        assert_eq!(names(manager_view), vec!["userB"]);

        let user_view = service
            .eligible_assignees(&Requester::user(Uuid::now_v7()))
            .await
            .unwrap();
        assert!(user_view.is_empty());

        let managers = service.eligible_managers().await.unwrap();
        assert_eq!(names(managers), vec!["managerA"]);
    }

    #[tokio::test]
    async fn test_malformed_store_is_infrastructure_not_rejection() {
        let service = service_with(InMemoryUserStore::with_raw("{not json"));
        let admin = Requester::admin(Uuid::now_v7());

        let result = service
            .create_user(new_user("carol", Role::User), &admin)
            .await;

        let err = result.unwrap_err();
        assert!(!err.is_rejection());
        assert!(matches!(
            err,
            IntakeError::Infrastructure(InfrastructureError::Users(UserError::MalformedData { .. }))
        ));
    }
}
