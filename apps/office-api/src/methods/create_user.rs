use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use office_lib::entities::UserDraft;
use office_lib::repository::traits::{RoleRepositoryTrait, UserRepositoryTrait};

use crate::error::{handle_service_error, ApiError};
use crate::methods::entities::{CreateUserRequest, EnvelopeResponse, UserResponse};
use crate::methods::routes::USERS_PATH;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = USERS_PATH,
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = EnvelopeResponse<UserResponse>),
        (status = 400, description = "Validation rejected the user; header.code is 401", body = EnvelopeResponse<UserResponse>),
        (status = 500, description = "Internal server error"),
    )
)]
pub async fn create_user<U, R>(
    State(state): State<AppState<U, R>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<EnvelopeResponse<UserResponse>>), ApiError>
where
    U: UserRepositoryTrait + Send + Sync + 'static,
    R: RoleRepositoryTrait + Send + Sync + 'static,
{
    let envelope = state
        .user_service
        .create(UserDraft::from(payload))
        .await
        .map_err(|e| handle_service_error(e, &state.env, "create"))?;

    let response = EnvelopeResponse::from_envelope(envelope);
    let status = if response.is_success() {
        StatusCode::CREATED
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(response)))
}
