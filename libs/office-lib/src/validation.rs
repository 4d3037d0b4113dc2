use crate::envelope::{ResponseEnvelope, VALIDATION_FAILED_CODE};
use crate::repository::errors::UserRepositoryError;

/// Business rules checked before a user is written, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateRejection {
    RoleRequired,
    RoleNotFound,
    UsernameInUse,
    EmailInUse,
}

impl CreateRejection {
    pub fn code(self) -> i32 {
        VALIDATION_FAILED_CODE
    }

    pub fn message(self) -> &'static str {
        match self {
            CreateRejection::RoleRequired => "Rol necesario",
            CreateRejection::RoleNotFound => "Uno o mas roles no existe",
            CreateRejection::UsernameInUse => "Username en uso",
            CreateRejection::EmailInUse => "Correo en uso",
        }
    }

    pub fn into_envelope<T>(self) -> ResponseEnvelope<T> {
        ResponseEnvelope::failure(self.code(), self.message())
    }

    /// Constraint violations raised by the store while writing a user.
    pub fn from_repository_error(err: &UserRepositoryError) -> Option<Self> {
        match err {
            UserRepositoryError::UsernameAlreadyExists => Some(CreateRejection::UsernameInUse),
            UserRepositoryError::EmailAlreadyExists => Some(CreateRejection::EmailInUse),
            UserRepositoryError::RoleNotFound => Some(CreateRejection::RoleNotFound),
            _ => None,
        }
    }
}
