use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u32 = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl User {
    pub fn role_ids(&self) -> Vec<i32> {
        unique_role_ids(self.roles.iter().map(|r| r.id))
    }
}

/// Payload accepted by `UserService::create`. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub name: String,
    pub last_name: String,
    #[serde(default)]
    pub roles: Vec<i32>,
}

impl UserDraft {
    pub fn role_ids(&self) -> Vec<i32> {
        unique_role_ids(self.roles.iter().copied())
    }
}

/// Drops repeated role ids, keeping the first occurrence of each.
fn unique_role_ids(ids: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut out: Vec<i32> = Vec::new();
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    pub limit: u32,
    pub offset: u64,
}

impl PaginationParams {
    pub fn new(limit: Option<u32>, offset: Option<u64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub limit: u32,
    pub offset: u64,
    pub total: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(data: Vec<T>, pagination: PaginationParams, total: u64) -> Self {
        Self {
            data,
            limit: pagination.limit,
            offset: pagination.offset,
            total,
        }
    }
}
