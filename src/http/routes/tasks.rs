use axum::{extract::{Path, State}, routing::{get, post}, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::domain::{
    summary::ElapsedTimeSummary,
    task::{CreateTask, Task, TaskPatch},
};
use crate::http::{auth::AuthUser, state::AppState, types::{object, ApiError}};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", post(create_task).get(list_tasks))
        .route("/retryTasks", post(create_task))
        .route("/tasks/:id", get(get_task).patch(update_task).delete(delete_task))
        .route("/projectsTimeSummary", get(projects_time_summary))
        .route("/usersTimeSummary", get(users_time_summary))
}

async fn create_task(State(state): State<AppState>, user: AuthUser, Json(body): Json<Value>) -> Result<Json<Task>, ApiError> {
    let input = CreateTask::from_request(&object(body)?)?;
    Ok(Json(state.tasks.create(user.id, input, Utc::now()).await?))
}

async fn list_tasks(State(state): State<AppState>, user: AuthUser) -> Result<Json<Value>, ApiError> {
    let tasks = state.tasks.list(user.id).await?;
    Ok(Json(json!({ "tasks": tasks })))
}

async fn get_task(State(state): State<AppState>, user: AuthUser, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let task = state.tasks.get(&id, user.id).await?;
    Ok(Json(json!({ "task": task })))
}

async fn update_task(State(state): State<AppState>, user: AuthUser, Path(id): Path<String>, Json(body): Json<Value>) -> Result<Json<Value>, ApiError> {
    let patch = TaskPatch::from_request(&object(body)?)?;
    let task = state.tasks.update_task(&id, user.id, patch, Utc::now()).await?;
    Ok(Json(json!({ "task": task })))
}

async fn delete_task(State(state): State<AppState>, user: AuthUser, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let task = state.tasks.delete(&id, user.id).await?;
    Ok(Json(json!({ "task": task })))
}

async fn projects_time_summary(State(state): State<AppState>, user: AuthUser) -> Result<Json<Vec<ElapsedTimeSummary>>, ApiError> {
    let owner = state.summary_scope.owner(user.id);
    Ok(Json(state.tasks.summarize_elapsed_time_by_project(owner).await?))
}

async fn users_time_summary(State(state): State<AppState>, user: AuthUser) -> Result<Json<Vec<ElapsedTimeSummary>>, ApiError> {
    let owner = state.summary_scope.owner(user.id);
    Ok(Json(state.tasks.summarize_elapsed_time_by_user(owner).await?))
}
