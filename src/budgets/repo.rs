use serde::Serialize;
use sqlx::{types::Decimal, FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Budget {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub amount: Decimal,
    pub period: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn insert(
    db: &PgPool,
    user_id: i32,
    name: &str,
    amount: Decimal,
    period: &str,
) -> Result<Budget, ApiError> {
    let row = sqlx::query_as::<_, Budget>(
        r#"
        INSERT INTO budgets (user_id, name, amount, period)
        VALUES ($1, $2, $3, $4)
        RETURNING id, user_id, name, amount, period, created_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(amount)
    .bind(period)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn list_by_user(db: &PgPool, user_id: i32) -> Result<Vec<Budget>, ApiError> {
    let rows = sqlx::query_as::<_, Budget>(
        r#"
        SELECT id, user_id, name, amount, period, created_at
        FROM budgets
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: i32) -> Result<Option<Budget>, ApiError> {
    let row = sqlx::query_as::<_, Budget>(
        r#"
        SELECT id, user_id, name, amount, period, created_at
        FROM budgets
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i32,
    name: &str,
    amount: Decimal,
    period: &str,
) -> Result<Option<Budget>, ApiError> {
    let row = sqlx::query_as::<_, Budget>(
        r#"
        UPDATE budgets SET name = $1, amount = $2, period = $3
        WHERE id = $4
        RETURNING id, user_id, name, amount, period, created_at
        "#,
    )
    .bind(name)
    .bind(amount)
    .bind(period)
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, id: i32) -> Result<bool, ApiError> {
    let row: Option<(i32,)> = sqlx::query_as(r#"DELETE FROM budgets WHERE id = $1 RETURNING id"#)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.is_some())
}
