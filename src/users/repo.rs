use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::dto::PublicUser;
use crate::error::ApiError;

/// Full row, as stored. Registration echoes it back hash included; that is
/// the documented external contract of the API.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn create(
    db: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, ApiError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, password, created_at
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_one(db)
    .await
    .map_err(|e| {
        if e.as_database_error()
            .map(|db_err| db_err.is_unique_violation())
            .unwrap_or(false)
        {
            ApiError::Conflict("Email already exists.".into())
        } else {
            ApiError::Store(e)
        }
    })?;
    Ok(user)
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn list(db: &PgPool) -> Result<Vec<PublicUser>, ApiError> {
    let rows = sqlx::query_as::<_, PublicUser>(r#"SELECT id, name, email FROM users"#)
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn find_public(db: &PgPool, id: i32) -> Result<Option<PublicUser>, ApiError> {
    let row = sqlx::query_as::<_, PublicUser>(r#"SELECT id, name, email FROM users WHERE id = $1"#)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i32,
    name: &str,
    email: &str,
) -> Result<Option<PublicUser>, ApiError> {
    let row = sqlx::query_as::<_, PublicUser>(
        r#"
        UPDATE users SET name = $1, email = $2
        WHERE id = $3
        RETURNING id, name, email
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, id: i32) -> Result<bool, ApiError> {
    let row: Option<(i32,)> = sqlx::query_as(r#"DELETE FROM users WHERE id = $1 RETURNING id"#)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.is_some())
}
