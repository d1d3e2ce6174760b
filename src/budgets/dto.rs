use serde::Deserialize;
use sqlx::types::Decimal;

#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    pub user_id: i32,
    pub name: String,
    pub amount: Decimal,
    pub period: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBudgetRequest {
    pub name: String,
    pub amount: Decimal,
    pub period: String,
}
