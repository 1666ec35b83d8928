#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tasktime::{config::SummaryScope, http::{routing, state::AppState}, infrastructure::sqlite_repo::SqliteStore};
use tower::ServiceExt;

pub async fn app(scope: SummaryScope) -> Router {
    // use in-memory sqlite for tests
    let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
    store.init().await.unwrap();
    routing::app(AppState::from_store(store, scope))
}

pub async fn request(app: &Router, method: &str, path: &str, token: Option<&str>, body: Option<Value>) -> hyper::Response<Body> {
    let mut req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    if let Some(token) = token {
        req = req.header("x-auth", token);
    }
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

pub async fn json_body(res: hyper::Response<Body>) -> Value {
    serde_json::from_slice(&to_bytes(res.into_body(), 1024 * 1024).await.unwrap()).unwrap()
}

/// Registers a user and returns `(token, user id)`.
pub async fn sign_up(app: &Router, email: &str) -> (String, String) {
    let res = request(app, "POST", "/users", None, Some(json!({ "email": email, "password": "pass1234" }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let token = res.headers().get("x-auth").unwrap().to_str().unwrap().to_string();
    let user = json_body(res).await;
    (token, user["id"].as_str().unwrap().to_string())
}

pub async fn create_project(app: &Router, token: &str, name: &str) -> String {
    let res = request(app, "POST", "/projects", Some(token), Some(json!({ "name": name }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    json_body(res).await["id"].as_str().unwrap().to_string()
}
