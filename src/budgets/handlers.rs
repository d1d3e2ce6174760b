use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::{
    dto::{CreateBudgetRequest, UpdateBudgetRequest},
    repo::{self, Budget},
};
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_budget))
        .route("/user/:user_id", get(list_for_user))
        .route(
            "/:id",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}

#[instrument(skip(state, auth, payload))]
pub async fn create_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBudgetRequest>,
) -> Result<(StatusCode, Json<Budget>), ApiError> {
    auth.authorize(payload.user_id)?;
    let budget = repo::insert(
        &state.db,
        payload.user_id,
        &payload.name,
        payload.amount,
        &payload.period,
    )
    .await?;
    info!(budget_id = %budget.id, user_id = %budget.user_id, "budget created");
    Ok((StatusCode::CREATED, Json(budget)))
}

#[instrument(skip(state, auth))]
pub async fn list_for_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<Budget>>, ApiError> {
    auth.authorize(user_id)?;
    let budgets = repo::list_by_user(&state.db, user_id).await?;
    Ok(Json(budgets))
}

#[instrument(skip(state, auth))]
pub async fn get_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Budget>, ApiError> {
    let budget = repo::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Budget"))?;
    auth.authorize(budget.user_id)?;
    Ok(Json(budget))
}

#[instrument(skip(state, auth, payload))]
pub async fn update_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBudgetRequest>,
) -> Result<Json<Budget>, ApiError> {
    let existing = repo::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Budget"))?;
    auth.authorize(existing.user_id)?;

    let budget = repo::update(&state.db, id, &payload.name, payload.amount, &payload.period)
        .await?
        .ok_or(ApiError::NotFound("Budget"))?;
    Ok(Json(budget))
}

#[instrument(skip(state, auth))]
pub async fn delete_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let existing = repo::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Budget"))?;
    auth.authorize(existing.user_id)?;

    if !repo::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Budget"));
    }
    info!(budget_id = %id, "budget deleted");
    Ok(Json(json!({ "message": "Budget deleted" })))
}
