use async_trait::async_trait;

use crate::entities::PaginationParams;
use crate::repository::errors::UserRepositoryError;
use crate::repository::models::{NewUserRow, RoleRow, UserRoleMapping, UserRow};

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Inserts the user and its role links in one transaction.
    async fn create_user(&self, user: &NewUserRow, role_ids: &[i32]) -> Result<UserRow, UserRepositoryError>;
    async fn get_user(&self, user_id: i32) -> Result<Option<UserRow>, UserRepositoryError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, UserRepositoryError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, UserRepositoryError>;
    /// Writes the columns of `user`; a non-empty `role_ids` replaces the role links.
    async fn update_user(&self, user: &UserRow, role_ids: &[i32]) -> Result<(), UserRepositoryError>;
    /// Fails with `UserRepositoryError::NotFound` when no row was removed.
    async fn delete_user(&self, user_id: i32) -> Result<(), UserRepositoryError>;
    async fn get_users_paginated(&self, pagination: PaginationParams) -> Result<(Vec<UserRow>, u64), UserRepositoryError>;
}

#[async_trait]
pub trait RoleRepositoryTrait: Send + Sync {
    async fn role_exists(&self, role_id: i32) -> Result<bool, UserRepositoryError>;
    async fn get_roles_for_user(&self, user_id: i32) -> Result<Vec<RoleRow>, UserRepositoryError>;
    async fn get_roles_for_users(&self, user_ids: &[i32]) -> Result<Vec<UserRoleMapping>, UserRepositoryError>;
    async fn get_roles_paginated(&self, pagination: PaginationParams) -> Result<(Vec<RoleRow>, u64), UserRepositoryError>;
}
