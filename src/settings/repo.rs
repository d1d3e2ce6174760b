use serde::Serialize;
use sqlx::{types::Decimal, FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::ApiError;

pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Settings {
    pub id: i32,
    pub user_id: i32,
    pub currency: String,
    pub monthly_income_target: Decimal,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str = r#"id, user_id, currency, monthly_income_target, updated_at"#;

/// Read-or-create: exactly one settings row per user, materialized with
/// defaults on first access. The insert races safely against concurrent
/// callers; whoever loses the conflict falls through to the read.
pub async fn get_or_create(db: &PgPool, user_id: i32) -> Result<Settings, ApiError> {
    let inserted = sqlx::query_as::<_, Settings>(&format!(
        r#"
        INSERT INTO user_settings (user_id, currency, monthly_income_target)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO NOTHING
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(DEFAULT_CURRENCY)
    .bind(Decimal::ZERO)
    .fetch_optional(db)
    .await?;

    if let Some(settings) = inserted {
        return Ok(settings);
    }

    // Row already existed; ON CONFLICT DO NOTHING returns nothing.
    let existing = sqlx::query_as::<_, Settings>(&format!(
        r#"SELECT {COLUMNS} FROM user_settings WHERE user_id = $1"#
    ))
    .bind(user_id)
    .fetch_one(db)
    .await?;
    Ok(existing)
}

/// Single-statement upsert keyed on the `user_id` uniqueness constraint, so
/// two concurrent writers can never both observe "absent" and double-insert.
/// Omitted fields take the defaults on first write and keep their stored
/// value on update.
pub async fn upsert(
    db: &PgPool,
    user_id: i32,
    currency: Option<&str>,
    monthly_income_target: Option<Decimal>,
) -> Result<Settings, ApiError> {
    let row = sqlx::query_as::<_, Settings>(&format!(
        r#"
        INSERT INTO user_settings (user_id, currency, monthly_income_target)
        VALUES ($1, COALESCE($2, '{DEFAULT_CURRENCY}'), COALESCE($3, 0))
        ON CONFLICT (user_id) DO UPDATE
        SET currency = COALESCE($2, user_settings.currency),
            monthly_income_target = COALESCE($3, user_settings.monthly_income_target),
            updated_at = CURRENT_TIMESTAMP
        RETURNING {COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(currency)
    .bind(monthly_income_target)
    .fetch_one(db)
    .await?;
    Ok(row)
}
