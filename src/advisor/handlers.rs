use axum::{routing::post, Json, Router};
use tracing::instrument;

use super::engine::{self, Advice, AnalyzeRequest};
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze))
}

#[instrument(skip_all)]
pub async fn analyze(
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<Advice>, ApiError> {
    tracing::debug!(user_id = %user_id, "advisor analysis requested");
    let advice = engine::analyze(payload)?;
    Ok(Json(advice))
}
