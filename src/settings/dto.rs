use serde::Deserialize;
use sqlx::types::Decimal;

/// Omitted fields take the defaults on first write and are left untouched
/// on an existing row.
#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub currency: Option<String>,
    pub monthly_income_target: Option<Decimal>,
}
