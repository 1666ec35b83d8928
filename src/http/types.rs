use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use crate::application::error::ServiceError;
use crate::domain::patch::{Body, PatchError};

#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response { (self.status, axum::Json(self)).into_response() }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidIdentifier(_) | ServiceError::NotFound => Self { status: StatusCode::NOT_FOUND, message: "not found".into() },
            ServiceError::Validation(message) => Self::bad_request(message),
            ServiceError::Store(err) => {
                tracing::error!(error = %err, "store failure");
                Self::bad_request("request rejected")
            }
            ServiceError::Authentication => Self { status: StatusCode::UNAUTHORIZED, message: "authentication required".into() },
        }
    }
}

impl From<PatchError> for ApiError {
    fn from(e: PatchError) -> Self { ServiceError::from(e).into() }
}

/// Request bodies must be JSON objects; their keys are read through the patch allow-lists.
pub fn object(body: Value) -> Result<Body, ApiError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::bad_request("expected a JSON object")),
    }
}
