use serde::Deserialize;
use sqlx::types::Decimal;
use time::Date;

use crate::dates::iso_date;

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub user_id: i32,
    pub budget_id: Option<i32>,
    pub amount: Decimal,
    pub description: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub category: String,
    /// "income" or "expense"; defaults to "expense" when omitted.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    pub amount: Decimal,
    pub description: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
}
