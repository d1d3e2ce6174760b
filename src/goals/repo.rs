use serde::Serialize;
use sqlx::{types::Decimal, FromRow, PgPool};
use time::{Date, OffsetDateTime};

use crate::{dates::iso_date, error::ApiError};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Goal {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    #[serde(with = "iso_date")]
    pub deadline: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str =
    r#"id, user_id, name, target_amount, current_amount, deadline, created_at"#;

pub async fn insert(
    db: &PgPool,
    user_id: i32,
    name: &str,
    target_amount: Decimal,
    current_amount: Decimal,
    deadline: Date,
) -> Result<Goal, ApiError> {
    let row = sqlx::query_as::<_, Goal>(&format!(
        r#"
        INSERT INTO goals (user_id, name, target_amount, current_amount, deadline)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(name)
    .bind(target_amount)
    .bind(current_amount)
    .bind(deadline)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn list_by_user(db: &PgPool, user_id: i32) -> Result<Vec<Goal>, ApiError> {
    let rows = sqlx::query_as::<_, Goal>(&format!(
        r#"SELECT {COLUMNS} FROM goals WHERE user_id = $1"#
    ))
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: i32) -> Result<Option<Goal>, ApiError> {
    let row = sqlx::query_as::<_, Goal>(&format!(r#"SELECT {COLUMNS} FROM goals WHERE id = $1"#))
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i32,
    name: &str,
    target_amount: Decimal,
    current_amount: Decimal,
    deadline: Date,
) -> Result<Option<Goal>, ApiError> {
    let row = sqlx::query_as::<_, Goal>(&format!(
        r#"
        UPDATE goals SET name = $1, target_amount = $2, current_amount = $3, deadline = $4
        WHERE id = $5
        RETURNING {COLUMNS}
        "#
    ))
    .bind(name)
    .bind(target_amount)
    .bind(current_amount)
    .bind(deadline)
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, id: i32) -> Result<bool, ApiError> {
    let row: Option<(i32,)> = sqlx::query_as(r#"DELETE FROM goals WHERE id = $1 RETURNING id"#)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.is_some())
}
