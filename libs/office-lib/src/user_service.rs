use crate::entities::{PaginatedResult, PaginationParams, Role, User, UserDraft};
use crate::envelope::ResponseEnvelope;
use crate::errors_service::UserServiceError;
use crate::repository::errors::UserRepositoryError;
use crate::repository::models::{NewUserRow, RoleRow, UserRoleMapping, UserRow};
use crate::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};
use crate::repository::{RoleRepository, UserRepository};
use crate::validation::CreateRejection;
use std::collections::HashMap;
use std::sync::Arc;

fn role_from_row(row: RoleRow) -> Role {
    Role {
        id: row.id,
        name: row.name,
    }
}

fn role_from_mapping(mapping: UserRoleMapping) -> (i32, Role) {
    let role = Role {
        id: mapping.role_id,
        name: mapping.role_name,
    };
    (mapping.user_id, role)
}

fn user_from_row(row: UserRow, roles: Vec<Role>) -> User {
    User {
        id: row.id,
        username: row.username,
        email: row.email,
        name: row.name,
        last_name: row.last_name,
        roles,
    }
}

/// Turns a store constraint violation into the matching rejection envelope;
/// anything else stays an error.
fn reject_or_fail<T>(err: UserRepositoryError) -> Result<ResponseEnvelope<T>, UserServiceError> {
    match CreateRejection::from_repository_error(&err) {
        Some(rejection) => {
            tracing::info!(reason = rejection.message(), error = %err, "store rejected user write");
            Ok(rejection.into_envelope())
        }
        None => Err(err.into()),
    }
}

/// Validates and applies user operations against the user and role stores.
#[derive(Debug, Clone)]
pub struct UserService<U = UserRepository, R = RoleRepository>
where
    U: UserRepositoryTrait,
    R: RoleRepositoryTrait,
{
    pub user_repo: Arc<U>,
    pub role_repo: Arc<R>,
}

impl UserService<UserRepository, RoleRepository> {
    pub fn new(user_repo: UserRepository, role_repo: RoleRepository) -> Self {
        Self {
            user_repo: Arc::new(user_repo),
            role_repo: Arc::new(role_repo),
        }
    }
}

impl<U, R> UserService<U, R>
where
    U: UserRepositoryTrait,
    R: RoleRepositoryTrait,
{
    pub fn with_repos(user_repo: Arc<U>, role_repo: Arc<R>) -> Self {
        Self {
            user_repo,
            role_repo,
        }
    }

    async fn fetch_roles_for_user(&self, user_id: i32) -> Result<Vec<Role>, UserServiceError> {
        Ok(self
            .role_repo
            .get_roles_for_user(user_id)
            .await?
            .into_iter()
            .map(role_from_row)
            .collect())
    }

    async fn build_users_with_roles(
        &self,
        user_rows: Vec<UserRow>,
    ) -> Result<Vec<User>, UserServiceError> {
        if user_rows.is_empty() {
            return Ok(vec![]);
        }

        let user_ids: Vec<i32> = user_rows.iter().map(|r| r.id).collect();
        let role_mappings = self.role_repo.get_roles_for_users(&user_ids).await?;

        let mut roles_by_user: HashMap<i32, Vec<Role>> = HashMap::new();
        for mapping in role_mappings {
            let (user_id, role) = role_from_mapping(mapping);
            roles_by_user.entry(user_id).or_default().push(role);
        }

        Ok(user_rows
            .into_iter()
            .map(|row| {
                let roles = roles_by_user.remove(&row.id).unwrap_or_default();
                user_from_row(row, roles)
            })
            .collect())
    }

    /// Runs the creation rules in order and stops at the first one broken.
    async fn check_create(
        &self,
        draft: &UserDraft,
        role_ids: &[i32],
    ) -> Result<Option<CreateRejection>, UserServiceError> {
        if role_ids.is_empty() {
            return Ok(Some(CreateRejection::RoleRequired));
        }

        for role_id in role_ids {
            if !self.role_repo.role_exists(*role_id).await? {
                tracing::debug!(role_id, "referenced role does not exist");
                return Ok(Some(CreateRejection::RoleNotFound));
            }
        }

        if self
            .user_repo
            .get_user_by_username(&draft.username)
            .await?
            .is_some()
        {
            return Ok(Some(CreateRejection::UsernameInUse));
        }

        if self.user_repo.get_user_by_email(&draft.email).await?.is_some() {
            return Ok(Some(CreateRejection::EmailInUse));
        }

        Ok(None)
    }

    /// Looks a user up by id. A miss is `Ok(None)`, not an error.
    pub async fn find(&self, user_id: i32) -> Result<Option<User>, UserServiceError> {
        match self.user_repo.get_user(user_id).await? {
            Some(row) => {
                let roles = self.fetch_roles_for_user(row.id).await?;
                Ok(Some(user_from_row(row, roles)))
            }
            None => Ok(None),
        }
    }

    pub async fn find_users(
        &self,
        pagination: PaginationParams,
    ) -> Result<PaginatedResult<User>, UserServiceError> {
        let (user_rows, total) = self.user_repo.get_users_paginated(pagination).await?;
        let users = self.build_users_with_roles(user_rows).await?;
        Ok(PaginatedResult::new(users, pagination, total))
    }

    pub async fn find_roles(
        &self,
        pagination: PaginationParams,
    ) -> Result<PaginatedResult<Role>, UserServiceError> {
        let (role_rows, total) = self.role_repo.get_roles_paginated(pagination).await?;
        let roles = role_rows.into_iter().map(role_from_row).collect();
        Ok(PaginatedResult::new(roles, pagination, total))
    }

    /// Validates `draft` and stores it.
    ///
    /// Broken business rules come back as a failure envelope inside `Ok`;
    /// `Err` is reserved for store failures.
    pub async fn create(&self, draft: UserDraft) -> Result<ResponseEnvelope<User>, UserServiceError> {
        let role_ids = draft.role_ids();

        if let Some(rejection) = self.check_create(&draft, &role_ids).await? {
            tracing::info!(
                username = %draft.username,
                email = %draft.email,
                reason = rejection.message(),
                "user creation rejected"
            );
            return Ok(rejection.into_envelope());
        }

        let new_user = NewUserRow {
            username: draft.username,
            email: draft.email,
            name: draft.name,
            last_name: draft.last_name,
        };

        let row = match self.user_repo.create_user(&new_user, &role_ids).await {
            Ok(row) => row,
            Err(err) => return reject_or_fail(err),
        };

        tracing::info!(user_id = row.id, username = %row.username, "user created");

        let roles = self.fetch_roles_for_user(row.id).await?;
        Ok(ResponseEnvelope::ok(user_from_row(row, roles)))
    }

    /// Writes `user` over the stored record with the same id.
    ///
    /// An unknown id is a `UserServiceError::Business` with
    /// `ErrorCode::OfficeNotFound`. Role links are replaced only when
    /// `user.roles` is non-empty.
    pub async fn update(&self, user: User) -> Result<ResponseEnvelope<bool>, UserServiceError> {
        if self.user_repo.get_user(user.id).await?.is_none() {
            tracing::warn!(user_id = user.id, "update of unknown user");
            return Err(UserServiceError::not_found());
        }

        let role_ids = user.role_ids();
        let row = UserRow {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            last_name: user.last_name,
        };

        if let Err(err) = self.user_repo.update_user(&row, &role_ids).await {
            return reject_or_fail(err);
        }

        tracing::info!(user_id = row.id, "user updated");
        Ok(ResponseEnvelope::ok(true))
    }

    pub async fn delete(&self, user_id: i32) -> Result<(), UserServiceError> {
        if self.user_repo.get_user(user_id).await?.is_none() {
            tracing::warn!(user_id, "delete of unknown user");
            return Err(UserServiceError::not_found());
        }

        self.user_repo.delete_user(user_id).await?;
        tracing::info!(user_id, "user deleted");
        Ok(())
    }
}
