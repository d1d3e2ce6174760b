use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use super::{
    dto::{CreateExpenseRequest, UpdateExpenseRequest},
    repo::{self, Expense},
};
use crate::{auth::AuthUser, error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_expense))
        .route("/user/:user_id", get(list_for_user))
        .route(
            "/:id",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

#[instrument(skip(state, auth, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    auth.authorize(payload.user_id)?;
    let kind = payload.kind.as_deref().unwrap_or("expense");
    let expense = repo::insert(
        &state.db,
        payload.user_id,
        payload.budget_id,
        payload.amount,
        &payload.description,
        payload.date,
        &payload.category,
        kind,
    )
    .await?;
    info!(expense_id = %expense.id, user_id = %expense.user_id, "expense created");
    Ok((StatusCode::CREATED, Json(expense)))
}

#[instrument(skip(state, auth))]
pub async fn list_for_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    auth.authorize(user_id)?;
    let expenses = repo::list_by_user(&state.db, user_id).await?;
    Ok(Json(expenses))
}

#[instrument(skip(state, auth))]
pub async fn get_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Expense>, ApiError> {
    let expense = repo::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Expense"))?;
    auth.authorize(expense.user_id)?;
    Ok(Json(expense))
}

#[instrument(skip(state, auth, payload))]
pub async fn update_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    let existing = repo::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Expense"))?;
    auth.authorize(existing.user_id)?;

    let expense = repo::update(
        &state.db,
        id,
        payload.amount,
        &payload.description,
        payload.date,
        &payload.category,
        &payload.kind,
    )
    .await?
    .ok_or(ApiError::NotFound("Expense"))?;
    Ok(Json(expense))
}

#[instrument(skip(state, auth))]
pub async fn delete_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let existing = repo::find(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("Expense"))?;
    auth.authorize(existing.user_id)?;

    if !repo::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Expense"));
    }
    info!(expense_id = %id, "expense deleted");
    Ok(Json(json!({ "message": "Expense deleted" })))
}
