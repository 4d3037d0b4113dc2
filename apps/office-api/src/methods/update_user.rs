use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use office_lib::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};

use crate::error::{handle_service_error, ApiError};
use crate::methods::entities::{EnvelopeResponse, UpdateUserRequest};
use crate::methods::parse_user_id;
use crate::methods::routes::USERS_BY_ID_PATH;
use crate::state::AppState;

#[utoipa::path(
    put,
    path = USERS_BY_ID_PATH,
    tag = "users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = EnvelopeResponse<bool>),
        (status = 400, description = "Invalid id, or username/email already taken", body = EnvelopeResponse<bool>),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn update_user<U, R>(
    Path(id): Path<String>,
    State(state): State<AppState<U, R>>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<(StatusCode, Json<EnvelopeResponse<bool>>), ApiError>
where
    U: UserRepositoryTrait + Send + Sync + 'static,
    R: RoleRepositoryTrait + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let envelope = state
        .user_service
        .update(payload.into_user(user_id))
        .await
        .map_err(|e| handle_service_error(e, &state.env, "update"))?;

    let response = EnvelopeResponse::from_envelope(envelope);
    let status = if response.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(response)))
}
