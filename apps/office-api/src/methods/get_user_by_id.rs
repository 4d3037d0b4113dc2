use axum::extract::{Path, State};
use axum::Json;
use office_lib::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};

use crate::error::{handle_service_error, ApiError};
use crate::methods::entities::UserResponse;
use crate::methods::parse_user_id;
use crate::methods::routes::USERS_BY_ID_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = USERS_BY_ID_PATH,
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn get_user_by_id<U, R>(
    Path(id): Path<String>,
    State(state): State<AppState<U, R>>,
) -> Result<Json<UserResponse>, ApiError>
where
    U: UserRepositoryTrait + Send + Sync + 'static,
    R: RoleRepositoryTrait + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    match state.user_service.find(user_id).await {
        Ok(Some(user)) => Ok(Json(UserResponse::from(user))),
        Ok(None) => Err(ApiError::user_not_found()),
        Err(e) => Err(handle_service_error(e, &state.env, "find")),
    }
}
