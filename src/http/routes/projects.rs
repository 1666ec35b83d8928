use axum::{extract::{Path, State}, routing::{get, post}, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::domain::project::{Project, ProjectPatch};
use crate::http::{auth::AuthUser, state::AppState, types::{object, ApiError}};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", post(create_project).get(list_projects))
        .route("/projects/:id", get(get_project).patch(update_project).delete(delete_project))
}

async fn create_project(State(state): State<AppState>, user: AuthUser, Json(body): Json<Value>) -> Result<Json<Project>, ApiError> {
    let input = ProjectPatch::from_request(&object(body)?)?;
    Ok(Json(state.projects.create(user.id, input, Utc::now()).await?))
}

async fn list_projects(State(state): State<AppState>, user: AuthUser) -> Result<Json<Value>, ApiError> {
    let projects = state.projects.list(user.id).await?;
    Ok(Json(json!({ "projects": projects })))
}

async fn get_project(State(state): State<AppState>, user: AuthUser, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let project = state.projects.get(&id, user.id).await?;
    Ok(Json(json!({ "project": project })))
}

async fn update_project(State(state): State<AppState>, user: AuthUser, Path(id): Path<String>, Json(body): Json<Value>) -> Result<Json<Value>, ApiError> {
    let patch = ProjectPatch::from_request(&object(body)?)?;
    let project = state.projects.update(&id, user.id, patch).await?;
    Ok(Json(json!({ "project": project })))
}

async fn delete_project(State(state): State<AppState>, user: AuthUser, Path(id): Path<String>) -> Result<Json<Value>, ApiError> {
    let project = state.projects.delete(&id, user.id).await?;
    Ok(Json(json!({ "project": project })))
}
