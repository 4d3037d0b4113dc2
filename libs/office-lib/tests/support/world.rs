use async_trait::async_trait;
use cucumber::World;
use mockall::mock;
use std::sync::{Arc, Mutex};

use office_lib::entities::{PaginatedResult, PaginationParams, User};
use office_lib::envelope::ResponseEnvelope;
use office_lib::errors_service::UserServiceError;
use office_lib::repository::errors::UserRepositoryError;
use office_lib::repository::models::{NewUserRow, RoleRow, UserRoleMapping, UserRow};
use office_lib::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};
use office_lib::user_service::UserService;

// Mock repositories
mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepositoryTrait for UserRepo {
        async fn create_user(&self, user: &NewUserRow, role_ids: &[i32]) -> Result<UserRow, UserRepositoryError>;
        async fn get_user(&self, user_id: i32) -> Result<Option<UserRow>, UserRepositoryError>;
        async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, UserRepositoryError>;
        async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, UserRepositoryError>;
        async fn update_user(&self, user: &UserRow, role_ids: &[i32]) -> Result<(), UserRepositoryError>;
        async fn delete_user(&self, user_id: i32) -> Result<(), UserRepositoryError>;
        async fn get_users_paginated(&self, pagination: PaginationParams) -> Result<(Vec<UserRow>, u64), UserRepositoryError>;
    }
}

mock! {
    pub RoleRepo {}

    #[async_trait]
    impl RoleRepositoryTrait for RoleRepo {
        async fn role_exists(&self, role_id: i32) -> Result<bool, UserRepositoryError>;
        async fn get_roles_for_user(&self, user_id: i32) -> Result<Vec<RoleRow>, UserRepositoryError>;
        async fn get_roles_for_users(&self, user_ids: &[i32]) -> Result<Vec<UserRoleMapping>, UserRepositoryError>;
        async fn get_roles_paginated(&self, pagination: PaginationParams) -> Result<(Vec<RoleRow>, u64), UserRepositoryError>;
    }
}

type Shared<T> = Arc<Mutex<Vec<T>>>;

fn roles_of(links: &[(i32, i32)], roles: &[RoleRow], user_id: i32) -> Vec<RoleRow> {
    links
        .iter()
        .filter(|(u, _)| *u == user_id)
        .filter_map(|(_, r)| roles.iter().find(|role| role.id == *r).cloned())
        .collect()
}

#[derive(Debug, Default, World)]
pub struct TestWorld {
    // Store contents shared with the mocks of each scenario
    pub users: Shared<UserRow>,
    pub roles: Shared<RoleRow>,
    pub links: Shared<(i32, i32)>,

    // Results
    pub create_result: Option<Result<ResponseEnvelope<User>, UserServiceError>>,
    pub update_result: Option<Result<ResponseEnvelope<bool>, UserServiceError>>,
    pub delete_result: Option<Result<(), UserServiceError>>,
    pub optional_user_result: Option<Result<Option<User>, UserServiceError>>,
    pub paginated_users_result: Option<Result<PaginatedResult<User>, UserServiceError>>,
    pub current_user: Option<User>,
    pub error: Option<UserServiceError>,
}

impl TestWorld {
    /// A service whose mocks read and write the scenario's in-memory store.
    pub fn service(&self) -> UserService<MockUserRepo, MockRoleRepo> {
        let mut user_repo = MockUserRepo::new();
        let mut role_repo = MockRoleRepo::new();

        let users = Arc::clone(&self.users);
        user_repo.expect_get_user().returning(move |id| {
            Ok(users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        });

        let users = Arc::clone(&self.users);
        user_repo.expect_get_user_by_username().returning(move |username| {
            Ok(users.lock().unwrap().iter().find(|u| u.username == username).cloned())
        });

        let users = Arc::clone(&self.users);
        user_repo.expect_get_user_by_email().returning(move |email| {
            Ok(users.lock().unwrap().iter().find(|u| u.email == email).cloned())
        });

        let users = Arc::clone(&self.users);
        let links = Arc::clone(&self.links);
        user_repo.expect_create_user().returning(move |new_user, role_ids| {
            let mut users = users.lock().unwrap();
            let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
            let row = UserRow {
                id,
                username: new_user.username.clone(),
                email: new_user.email.clone(),
                name: new_user.name.clone(),
                last_name: new_user.last_name.clone(),
            };
            users.push(row.clone());
            links.lock().unwrap().extend(role_ids.iter().map(|r| (id, *r)));
            Ok(row)
        });

        let users = Arc::clone(&self.users);
        let links = Arc::clone(&self.links);
        user_repo.expect_update_user().returning(move |row, role_ids| {
            let mut users = users.lock().unwrap();
            let stored = users
                .iter_mut()
                .find(|u| u.id == row.id)
                .ok_or(UserRepositoryError::NotFound)?;
            *stored = row.clone();
            if !role_ids.is_empty() {
                let mut links = links.lock().unwrap();
                links.retain(|(u, _)| *u != row.id);
                links.extend(role_ids.iter().map(|r| (row.id, *r)));
            }
            Ok(())
        });

        let users = Arc::clone(&self.users);
        let links = Arc::clone(&self.links);
        user_repo.expect_delete_user().returning(move |id| {
            let mut users = users.lock().unwrap();
            let before = users.len();
            users.retain(|u| u.id != id);
            if users.len() == before {
                return Err(UserRepositoryError::NotFound);
            }
            links.lock().unwrap().retain(|(u, _)| *u != id);
            Ok(())
        });

        let users = Arc::clone(&self.users);
        user_repo.expect_get_users_paginated().returning(move |p| {
            let users = users.lock().unwrap();
            let page = users
                .iter()
                .skip(p.offset as usize)
                .take(p.limit as usize)
                .cloned()
                .collect();
            Ok((page, users.len() as u64))
        });

        let roles = Arc::clone(&self.roles);
        role_repo.expect_role_exists().returning(move |id| {
            Ok(roles.lock().unwrap().iter().any(|r| r.id == id))
        });

        let roles = Arc::clone(&self.roles);
        let links = Arc::clone(&self.links);
        role_repo.expect_get_roles_for_user().returning(move |user_id| {
            Ok(roles_of(&links.lock().unwrap(), &roles.lock().unwrap(), user_id))
        });

        let roles = Arc::clone(&self.roles);
        let links = Arc::clone(&self.links);
        role_repo.expect_get_roles_for_users().returning(move |user_ids| {
            let links = links.lock().unwrap();
            let roles = roles.lock().unwrap();
            Ok(user_ids
                .iter()
                .flat_map(|user_id| {
                    roles_of(&links, &roles, *user_id)
                        .into_iter()
                        .map(move |role| UserRoleMapping {
                            user_id: *user_id,
                            role_id: role.id,
                            role_name: role.name,
                        })
                })
                .collect())
        });

        let roles = Arc::clone(&self.roles);
        role_repo.expect_get_roles_paginated().returning(move |p| {
            let roles = roles.lock().unwrap();
            let page = roles
                .iter()
                .skip(p.offset as usize)
                .take(p.limit as usize)
                .cloned()
                .collect();
            Ok((page, roles.len() as u64))
        });

        UserService::with_repos(Arc::new(user_repo), Arc::new(role_repo))
    }
}
