use std::sync::Arc;
use office_lib::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};
use office_lib::repository::{RoleRepository, UserRepository};
use office_lib::user_service::UserService;

pub struct AppState<U = UserRepository, R = RoleRepository>
where
    U: UserRepositoryTrait + Send + Sync + 'static,
    R: RoleRepositoryTrait + Send + Sync + 'static,
{
    pub user_service: Arc<UserService<U, R>>,
    pub env: String,
}

impl<U, R> AppState<U, R>
where
    U: UserRepositoryTrait + Send + Sync + 'static,
    R: RoleRepositoryTrait + Send + Sync + 'static,
{
    pub fn new(user_service: UserService<U, R>, env: impl Into<String>) -> Self {
        Self {
            user_service: Arc::new(user_service),
            env: env.into(),
        }
    }
}

// Manual impl: the repositories themselves need not be `Clone`.
impl<U, R> Clone for AppState<U, R>
where
    U: UserRepositoryTrait + Send + Sync + 'static,
    R: RoleRepositoryTrait + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            env: self.env.clone(),
        }
    }
}
