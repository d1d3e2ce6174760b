use serde::Deserialize;
use sqlx::types::Decimal;
use time::Date;

use crate::dates::iso_date;

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub user_id: i32,
    pub name: String,
    pub target_amount: Decimal,
    /// Defaults to 0 when omitted.
    pub current_amount: Option<Decimal>,
    #[serde(with = "iso_date")]
    pub deadline: Date,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGoalRequest {
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    #[serde(with = "iso_date")]
    pub deadline: Date,
}
