use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::types::Decimal;
use tracing::{info, instrument};

use super::{
    dto::{CreateGoalRequest, UpdateGoalRequest},
    repo::{self, Goal},
};
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_goal))
        .route("/user/:user_id", get(list_for_user))
        .route("/:id", get(get_goal).put(update_goal).delete(delete_goal))
}

#[instrument(skip(state, auth, payload))]
pub async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    auth.authorize(payload.user_id)?;
    let goal = repo::insert(
        &state.db,
        payload.user_id,
        &payload.name,
        payload.target_amount,
        payload.current_amount.unwrap_or(Decimal::ZERO),
        payload.deadline,
    )
    .await?;
    info!(goal_id = %goal.id, user_id = %goal.user_id, "goal created");
    Ok((StatusCode::CREATED, Json(goal)))
}

#[instrument(skip(state, auth))]
pub async fn list_for_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    auth.authorize(user_id)?;
    let goals = repo::list_by_user(&state.db, user_id).await?;
    Ok(Json(goals))
}

#[instrument(skip(state, auth))]
pub async fn get_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Goal>, ApiError> {
    let goal = repo::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Goal"))?;
    auth.authorize(goal.user_id)?;
    Ok(Json(goal))
}

#[instrument(skip(state, auth, payload))]
pub async fn update_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateGoalRequest>,
) -> Result<Json<Goal>, ApiError> {
    let existing = repo::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Goal"))?;
    auth.authorize(existing.user_id)?;

    let goal = repo::update(
        &state.db,
        id,
        &payload.name,
        payload.target_amount,
        payload.current_amount,
        payload.deadline,
    )
    .await?
    .ok_or(ApiError::NotFound("Goal"))?;
    Ok(Json(goal))
}

#[instrument(skip(state, auth))]
pub async fn delete_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let existing = repo::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Goal"))?;
    auth.authorize(existing.user_id)?;

    if !repo::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Goal"));
    }
    info!(goal_id = %id, "goal deleted");
    Ok(Json(json!({ "message": "Goal deleted" })))
}
