pub mod create_user;
pub mod delete_user;
pub mod entities;
pub mod get_roles;
pub mod get_user_by_id;
pub mod get_users;
pub mod health_check;
pub mod routes;
pub mod update_user;

use crate::error::ApiError;

/// Store ids are positive `INT`s; anything else can't name a user.
pub(crate) fn parse_user_id(raw: &str) -> Result<i32, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::invalid_id()),
    }
}
