use std::fmt;

use serde::{Deserialize, Serialize};

use crate::repository::errors::UserRepositoryError;

/// Stable domain error kinds reported through `UserServiceError::Business`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UnknownError,
    OfficeNotFound,
}

impl ErrorCode {
    pub fn code(self) -> i32 {
        match self {
            ErrorCode::UnknownError => 1,
            ErrorCode::OfficeNotFound => 2,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::UnknownError => "Error desconocido",
            ErrorCode::OfficeNotFound => "Registro no encontrado",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UserServiceError {
    #[error("business error: {code}")]
    Business { code: ErrorCode },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UserServiceError {
    pub fn not_found() -> Self {
        UserServiceError::Business {
            code: ErrorCode::OfficeNotFound,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            UserServiceError::Business { code } => *code,
            UserServiceError::Internal(_) => ErrorCode::UnknownError,
        }
    }

    /// Numeric code of the error kind.
    pub fn code(&self) -> i32 {
        self.error_code().code()
    }

    pub fn is_not_found(&self) -> bool {
        self.error_code() == ErrorCode::OfficeNotFound
    }
}

impl From<UserRepositoryError> for UserServiceError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::NotFound => UserServiceError::not_found(),
            other => UserServiceError::Internal(other.into()),
        }
    }
}
