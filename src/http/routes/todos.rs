use axum::{extract::{Path, State}, routing::{get, post}, Router, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::domain::todo::{CreateTodo, Todo, UpdateTodo};
use crate::http::{auth::AuthUser, state::AppState, types::{object, ApiError}};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", post(create_todo).get(list_todos))
        .route("/todos/:id", get(get_todo).patch(update_todo).delete(delete_todo))
}

async fn create_todo(State(state): State<AppState>, user: AuthUser, Json(payload): Json<Value>) -> Result<Json<Todo>, ApiError> {
    let input = CreateTodo::from_request(&object(payload)?)?;
    Ok(Json(state.todos.create(user.id, input).await?))
}

async fn list_todos(State(state): State<AppState>, user: AuthUser) -> Result<Json<Value>, ApiError> {
    let todos = state.todos.list(user.id).await?;
    Ok(Json(json!({ "todos": todos })))
}

async fn get_todo(State(state): State<AppState>, user: AuthUser, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let todo = state.todos.get(&id, user.id).await?;
    Ok(Json(json!({ "todo": todo })))
}

async fn update_todo(State(state): State<AppState>, user: AuthUser, Path(id): Path<String>, Json(payload): Json<Value>) -> Result<Json<Value>, ApiError> {
    let update = UpdateTodo::from_request(&object(payload)?, Utc::now())?;
    let todo = state.todos.update(&id, user.id, update).await?;
    Ok(Json(json!({ "todo": todo })))
}

async fn delete_todo(State(state): State<AppState>, user: AuthUser, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let todo = state.todos.delete(&id, user.id).await?;
    Ok(Json(json!({ "todo": todo })))
}
