use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use office_lib::errors_service::{ErrorCode, UserServiceError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound { message: String, code: Option<i32> },
    Internal(String),
}

impl ApiError {
    pub fn invalid_id() -> Self {
        ApiError::BadRequest("invalid id".to_string())
    }

    pub fn user_not_found() -> Self {
        ApiError::NotFound {
            message: "user not found".to_string(),
            code: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message, code) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", Some(msg), None),
            ApiError::NotFound { message, code } => (StatusCode::NOT_FOUND, "not_found", Some(message), code),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", Some(msg), None),
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
            code,
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Business { code: ErrorCode::OfficeNotFound } => ApiError::NotFound {
                message: ErrorCode::OfficeNotFound.message().to_string(),
                code: Some(ErrorCode::OfficeNotFound.code()),
            },
            UserServiceError::Internal(err) => ApiError::Internal(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Check if environment is production-like (prod, prod01, prod02, etc.)
pub fn is_prod_like(env: &str) -> bool {
    env.to_lowercase().starts_with("prod")
}

/// Converts a service error to an ApiError, logging internal errors.
/// In production, internal error details are hidden.
pub fn handle_service_error(err: UserServiceError, env: &str, operation: &str) -> ApiError {
    if err.is_not_found() {
        return ApiError::from(err);
    }

    tracing::error!(env = %env, error = ?err, operation = %operation, "service error");
    if is_prod_like(env) {
        ApiError::Internal("internal server error".to_string())
    } else {
        ApiError::from(err)
    }
}
