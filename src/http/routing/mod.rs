use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::routes::{projects, tasks, todos, users};
use super::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(users::router())
        .merge(projects::router())
        .merge(tasks::router())
        .merge(todos::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
