use async_trait::async_trait;
use sqlx::{query, query_as, query_scalar, MySql, MySqlPool, QueryBuilder, Transaction};

use crate::entities::PaginationParams;
use crate::repository::errors::{map_sqlx_error, UserRepositoryError};
use crate::repository::models::{NewUserRow, UserRow};
use crate::repository::traits::UserRepositoryTrait;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pub pool: MySqlPool,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

async fn insert_role_links(
    tx: &mut Transaction<'_, MySql>,
    user_id: i32,
    role_ids: &[i32],
) -> Result<(), UserRepositoryError> {
    if role_ids.is_empty() {
        return Ok(());
    }

    let mut builder = QueryBuilder::<MySql>::new("INSERT INTO user_roles (user_id, role_id) ");
    builder.push_values(role_ids, |mut row, role_id| {
        row.push_bind(user_id).push_bind(*role_id);
    });
    builder
        .build()
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx_error)?;

    Ok(())
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create_user(&self, user: &NewUserRow, role_ids: &[i32]) -> Result<UserRow, UserRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = query(
            r#"
            INSERT INTO users (username, email, name, last_name)
            VALUES (?, ?, ?, ?)
            "#
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.last_name)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        let user_id = i32::try_from(result.last_insert_id())
            .map_err(|e| UserRepositoryError::Sqlx(sqlx::Error::Decode(Box::new(e))))?;

        insert_role_links(&mut tx, user_id, role_ids).await?;

        tx.commit().await.map_err(map_sqlx_error)?;

        tracing::debug!(user_id, roles = role_ids.len(), "user row inserted");

        Ok(UserRow {
            id: user_id,
            username: user.username.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            last_name: user.last_name.clone(),
        })
    }

    async fn get_user(&self, user_id: i32) -> Result<Option<UserRow>, UserRepositoryError> {
        let user = query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, name, last_name FROM users WHERE id = ?
            "#
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(user)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, UserRepositoryError> {
        let user = query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, name, last_name FROM users WHERE username = ?
            "#
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>, UserRepositoryError> {
        let user = query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, name, last_name FROM users WHERE email = ?
            "#
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(user)
    }

    async fn update_user(&self, user: &UserRow, role_ids: &[i32]) -> Result<(), UserRepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // MySQL reports zero affected rows for an unchanged row, so existence
        // is checked by the caller rather than from this result.
        query(
            r#"
            UPDATE users
            SET username = ?, email = ?, name = ?, last_name = ?
            WHERE id = ?
            "#
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.last_name)
        .bind(user.id)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if !role_ids.is_empty() {
            query(
                r#"
                DELETE FROM user_roles WHERE user_id = ?
                "#
            )
            .bind(user.id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

            insert_role_links(&mut tx, user.id, role_ids).await?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn delete_user(&self, user_id: i32) -> Result<(), UserRepositoryError> {
        let result = query(
            r#"
            DELETE FROM users WHERE id = ?
            "#
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(UserRepositoryError::NotFound);
        }

        Ok(())
    }

    async fn get_users_paginated(&self, pagination: PaginationParams) -> Result<(Vec<UserRow>, u64), UserRepositoryError> {
        let users = query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, name, last_name
            FROM users
            ORDER BY id
            LIMIT ? OFFSET ?
            "#
        )
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let total: i64 = query_scalar(r#"SELECT COUNT(*) FROM users"#)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok((users, u64::try_from(total).unwrap_or_default()))
    }
}
