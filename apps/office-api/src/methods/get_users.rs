use axum::extract::{Query, State};
use axum::Json;
use office_lib::entities::PaginationParams;
use office_lib::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};

use crate::error::{handle_service_error, ApiError};
use crate::methods::entities::{PaginatedResponse, PaginationQuery, UserResponse};
use crate::methods::routes::USERS_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = USERS_PATH,
    tag = "users",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of users ordered by id", body = PaginatedResponse<UserResponse>),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn get_users<U, R>(
    State(state): State<AppState<U, R>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<UserResponse>>, ApiError>
where
    U: UserRepositoryTrait + Send + Sync + 'static,
    R: RoleRepositoryTrait + Send + Sync + 'static,
{
    let pagination = PaginationParams::from(query);
    state
        .user_service
        .find_users(pagination)
        .await
        .map(|page| Json(PaginatedResponse::from(page)))
        .map_err(|e| handle_service_error(e, &state.env, "find_users"))
}
