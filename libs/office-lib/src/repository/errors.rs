#[derive(Debug)]
pub enum UserRepositoryError {
    UsernameAlreadyExists,
    EmailAlreadyExists,
    RoleNotFound,
    NotFound,
    Sqlx(sqlx::Error),
}

impl std::fmt::Display for UserRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRepositoryError::UsernameAlreadyExists => write!(f, "username already exists"),
            UserRepositoryError::EmailAlreadyExists => write!(f, "email already exists"),
            UserRepositoryError::RoleNotFound => write!(f, "role not found"),
            UserRepositoryError::NotFound => write!(f, "not found"),
            UserRepositoryError::Sqlx(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for UserRepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UserRepositoryError::Sqlx(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for UserRepositoryError {
    fn from(value: sqlx::Error) -> Self {
        map_sqlx_error(value)
    }
}

const USER_USERNAME_UNIQUE: &str = "user_username_unique";
const USER_EMAIL_UNIQUE: &str = "user_email_unique";
const USER_ROLES_ROLE_FK: &str = "user_roles_role_fk";

fn extract_mysql_key_name(msg_lower: &str) -> Option<String> {
    // msg_lower is already lowercased
    let marker = "for key '";
    let start = msg_lower.find(marker)? + marker.len();
    let rest = &msg_lower[start..];
    let end = rest.find('\'')?;
    Some(rest[..end].to_string())
}

/// Classifies a MySQL integrity violation from its SQLSTATE and message.
///
/// Duplicate keys read "Duplicate entry 'x' for key 'users.user_email_unique'";
/// MySQL prefixes the key with the table name, hence `ends_with`. A missing
/// role surfaces as a failed `user_roles_role_fk` foreign key.
pub fn classify_constraint_violation(code: Option<&str>, message: &str) -> Option<UserRepositoryError> {
    if code != Some("23000") {
        return None;
    }

    let msg = message.to_lowercase();

    if msg.contains("duplicate entry") && msg.contains("for key") {
        let key = extract_mysql_key_name(&msg).unwrap_or_default();

        if key.ends_with(USER_USERNAME_UNIQUE) || msg.contains(USER_USERNAME_UNIQUE) {
            return Some(UserRepositoryError::UsernameAlreadyExists);
        }

        if key.ends_with(USER_EMAIL_UNIQUE) || msg.contains(USER_EMAIL_UNIQUE) {
            return Some(UserRepositoryError::EmailAlreadyExists);
        }
    }

    if msg.contains("foreign key constraint fails") && msg.contains(USER_ROLES_ROLE_FK) {
        return Some(UserRepositoryError::RoleNotFound);
    }

    None
}

pub fn map_sqlx_error(err: sqlx::Error) -> UserRepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        let code = db_err.code();
        if let Some(mapped) = classify_constraint_violation(code.as_deref(), db_err.message()) {
            tracing::debug!(error = %db_err, mapped = %mapped, "constraint violation");
            return mapped;
        }
    }

    UserRepositoryError::Sqlx(err)
}
