use axum::extract::{Path, State};
use axum::http::StatusCode;
use office_lib::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};

use crate::error::{handle_service_error, ApiError};
use crate::methods::parse_user_id;
use crate::methods::routes::USERS_BY_ID_PATH;
use crate::state::AppState;

#[utoipa::path(
    delete,
    path = USERS_BY_ID_PATH,
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn delete_user<U, R>(
    Path(id): Path<String>,
    State(state): State<AppState<U, R>>,
) -> Result<StatusCode, ApiError>
where
    U: UserRepositoryTrait + Send + Sync + 'static,
    R: RoleRepositoryTrait + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    state
        .user_service
        .delete(user_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| handle_service_error(e, &state.env, "delete"))
}
