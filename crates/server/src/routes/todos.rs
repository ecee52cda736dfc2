use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use common::types::OkBody;
use models::todo::{CreateTodo, Todo, UpdateTodo};

use crate::errors::ApiError;
use crate::extract::LenientJson;
use crate::state::AppState;

/// 2^53: above this an f64 no longer names a single integer.
const MAX_EXACT_FLOAT_ID: f64 = 9_007_199_254_740_992.0;

/// Ids arrive as raw path text. Integral numbers in float or exponent form
/// (`1714564800000.0`, `1e3`) name the same id; anything else cannot match a stored item.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return Ok(id);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_ID => Ok(f as i64),
        _ => Err(ApiError::not_found()),
    }
}

/// GET /api/todos
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.todos.list().await?))
}

/// POST /api/todos
pub async fn create_todo(
    State(state): State<AppState>,
    LenientJson(input): LenientJson<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state.todos.create(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PATCH /api/todos/:id
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    LenientJson(input): LenientJson<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.todos.update(id, input).await?))
}

/// DELETE /api/todos/:id
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OkBody>, ApiError> {
    let id = parse_id(&id)?;
    state.todos.delete(id).await?;
    Ok(Json(OkBody::default()))
}
