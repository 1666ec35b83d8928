use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::{delete, get, post}, Json, Router};
use serde_json::Value;

use crate::application::auth_service::Session;
use crate::domain::user::{Credentials, User};
use crate::http::{auth::{AuthUser, AUTH_HEADER}, state::AppState, types::{object, ApiError}};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(register))
        .route("/users/login", post(login))
        .route("/users/me", get(me))
        .route("/users/me/token", delete(logout))
}

fn issued(session: Session) -> impl IntoResponse {
    ([(AUTH_HEADER, session.token)], Json(session.user))
}

async fn register(State(state): State<AppState>, Json(body): Json<Value>) -> Result<impl IntoResponse, ApiError> {
    let credentials = Credentials::from_request(&object(body)?)?;
    Ok(issued(state.auth.register(credentials).await?))
}

async fn login(State(state): State<AppState>, Json(body): Json<Value>) -> Result<impl IntoResponse, ApiError> {
    let credentials = Credentials::from_request(&object(body)?)?;
    Ok(issued(state.auth.login(credentials).await?))
}

async fn me(caller: AuthUser) -> Json<User> {
    Json(caller.user)
}

async fn logout(State(state): State<AppState>, user: AuthUser) -> Result<StatusCode, ApiError> {
    state.auth.logout(&user.token).await?;
    Ok(StatusCode::OK)
}
