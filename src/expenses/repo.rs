use serde::Serialize;
use sqlx::{types::Decimal, FromRow, PgPool};
use time::{Date, OffsetDateTime};

use crate::{dates::iso_date, error::ApiError};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Expense {
    pub id: i32,
    pub user_id: i32,
    pub budget_id: Option<i32>,
    pub amount: Decimal,
    pub description: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub category: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = r#"id, user_id, budget_id, amount, description, date, category, type, created_at"#;

pub async fn insert(
    db: &PgPool,
    user_id: i32,
    budget_id: Option<i32>,
    amount: Decimal,
    description: &str,
    date: Date,
    category: &str,
    kind: &str,
) -> Result<Expense, ApiError> {
    let row = sqlx::query_as::<_, Expense>(&format!(
        r#"
        INSERT INTO expenses (user_id, budget_id, amount, description, date, category, type)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(budget_id)
    .bind(amount)
    .bind(description)
    .bind(date)
    .bind(category)
    .bind(kind)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn list_by_user(db: &PgPool, user_id: i32) -> Result<Vec<Expense>, ApiError> {
    let rows = sqlx::query_as::<_, Expense>(&format!(
        r#"SELECT {COLUMNS} FROM expenses WHERE user_id = $1"#
    ))
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: i32) -> Result<Option<Expense>, ApiError> {
    let row = sqlx::query_as::<_, Expense>(&format!(
        r#"SELECT {COLUMNS} FROM expenses WHERE id = $1"#
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn update(
    db: &PgPool,
    id: i32,
    amount: Decimal,
    description: &str,
    date: Date,
    category: &str,
    kind: &str,
) -> Result<Option<Expense>, ApiError> {
    let row = sqlx::query_as::<_, Expense>(&format!(
        r#"
        UPDATE expenses SET amount = $1, description = $2, date = $3, category = $4, type = $5
        WHERE id = $6
        RETURNING {COLUMNS}
        "#
    ))
    .bind(amount)
    .bind(description)
    .bind(date)
    .bind(category)
    .bind(kind)
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn delete(db: &PgPool, id: i32) -> Result<bool, ApiError> {
    let row: Option<(i32,)> = sqlx::query_as(r#"DELETE FROM expenses WHERE id = $1 RETURNING id"#)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.is_some())
}
