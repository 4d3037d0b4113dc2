use axum::extract::{Query, State};
use axum::Json;
use office_lib::entities::PaginationParams;
use office_lib::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};

use crate::error::{handle_service_error, ApiError};
use crate::methods::entities::{PaginatedResponse, PaginationQuery, RoleResponse};
use crate::methods::routes::ROLES_PATH;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = ROLES_PATH,
    tag = "roles",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of roles ordered by id", body = PaginatedResponse<RoleResponse>),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn get_roles<U, R>(
    State(state): State<AppState<U, R>>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<RoleResponse>>, ApiError>
where
    U: UserRepositoryTrait + Send + Sync + 'static,
    R: RoleRepositoryTrait + Send + Sync + 'static,
{
    state
        .user_service
        .find_roles(PaginationParams::from(query))
        .await
        .map(|page| Json(PaginatedResponse::from(page)))
        .map_err(|e| handle_service_error(e, &state.env, "find_roles"))
}
