use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::UpdateSettingsRequest,
    repo::{self, Settings},
};
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/user/:user_id", get(get_settings).put(put_settings))
}

#[instrument(skip(state, auth))]
pub async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
) -> Result<Json<Settings>, ApiError> {
    auth.authorize(user_id)?;
    let settings = repo::get_or_create(&state.db, user_id).await?;
    Ok(Json(settings))
}

#[instrument(skip(state, auth, payload))]
pub async fn put_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<Settings>, ApiError> {
    auth.authorize(user_id)?;
    let settings = repo::upsert(
        &state.db,
        user_id,
        payload.currency.as_deref(),
        payload.monthly_income_target,
    )
    .await?;
    info!(user_id = %user_id, currency = %settings.currency, "settings upserted");
    Ok(Json(settings))
}
