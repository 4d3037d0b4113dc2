use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use office_lib::entities::{PaginatedResult, PaginationParams, Role, User, UserDraft};
use office_lib::envelope::ResponseEnvelope;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
    /// Ids of existing roles; at least one is required.
    #[serde(default)]
    pub roles: Vec<i32>,
}

impl From<CreateUserRequest> for UserDraft {
    fn from(req: CreateUserRequest) -> Self {
        UserDraft {
            username: req.username,
            email: req.email,
            name: req.name,
            last_name: req.last_name,
            roles: req.roles,
        }
    }
}

/// Full replacement of a user's columns. An empty `roles` list keeps the
/// current role links.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<i32>,
}

impl UpdateUserRequest {
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            name: self.name,
            last_name: self.last_name,
            roles: self
                .roles
                .into_iter()
                .map(|role_id| Role {
                    id: role_id,
                    name: String::new(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    pub id: i32,
    pub name: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        RoleResponse {
            id: role.id,
            name: role.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
    pub roles: Vec<RoleResponse>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name,
            last_name: user.last_name,
            roles: user.roles.into_iter().map(RoleResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page size, defaults to 20.
    pub limit: Option<u32>,
    /// Rows to skip, defaults to 0.
    pub offset: Option<u64>,
}

impl From<PaginationQuery> for PaginationParams {
    fn from(query: PaginationQuery) -> Self {
        PaginationParams::new(query.limit, query.offset)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub limit: u32,
    pub offset: u64,
    pub total: u64,
}

impl<T, U> From<PaginatedResult<T>> for PaginatedResponse<U>
where
    U: From<T>,
{
    fn from(result: PaginatedResult<T>) -> Self {
        PaginatedResponse {
            data: result.data.into_iter().map(U::from).collect(),
            limit: result.limit,
            offset: result.offset,
            total: result.total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HeaderResponse {
    /// 0 on success, 401 when validation rejected the request.
    pub code: i32,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnvelopeResponse<T> {
    pub header: HeaderResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<T>,
}

impl<T> EnvelopeResponse<T> {
    pub fn from_envelope<S>(envelope: ResponseEnvelope<S>) -> Self
    where
        T: From<S>,
    {
        let header = HeaderResponse {
            code: envelope.code(),
            message: envelope.message().to_string(),
        };
        EnvelopeResponse {
            header,
            body: envelope.into_body().map(T::from),
        }
    }

    pub fn is_success(&self) -> bool {
        self.header.code == office_lib::envelope::SUCCESS_CODE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_uses_given_id() {
        let req = UpdateUserRequest {
            username: "guy.stark".to_string(),
            email: "guy.stark@company.net".to_string(),
            name: "Guy".to_string(),
            last_name: "Stark".to_string(),
            roles: vec![1, 2],
        };
        let user = req.into_user(7);
        assert_eq!(user.id, 7);
        assert_eq!(user.role_ids(), vec![1, 2]);
    }

    #[test]
    fn failure_envelope_has_no_body() {
        let envelope: ResponseEnvelope<User> = ResponseEnvelope::failure(401, "Rol necesario");
        let response: EnvelopeResponse<UserResponse> = EnvelopeResponse::from_envelope(envelope);
        assert!(!response.is_success());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["header"]["code"], 401);
        assert_eq!(json["header"]["message"], "Rol necesario");
        assert!(json.get("body").is_none());
    }

    #[test]
    fn create_request_reads_camel_case() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"username":"a","email":"a@b.c","name":"A","lastName":"B","roles":[3]}"#,
        )
        .unwrap();
        let draft = UserDraft::from(req);
        assert_eq!(draft.last_name, "B");
        assert_eq!(draft.roles, vec![3]);
    }
}
