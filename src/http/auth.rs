use async_trait::async_trait;
use axum::extract::FromRequestParts;
use ::http::{header::AUTHORIZATION, request::Parts, HeaderMap};

use super::state::AppState;
use super::types::ApiError;
use crate::application::{auth_service::IdentityProvider, error::ServiceError};
use crate::domain::ids::UserId;
use crate::domain::user::User;

/// Header carrying the session token, both on requests and on sign-up/login responses.
pub const AUTH_HEADER: &str = "x-auth";

/// The verified caller. Extracting it rejects the request with 401 when the token is
/// missing or unknown.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = presented_token(&parts.headers).ok_or(ServiceError::Authentication)?;
        let user = state.auth.verify(&token).await?;
        Ok(Self { id: user.id, user, token })
    }
}

/// `x-auth: <token>` or `Authorization: Bearer <token>`.
fn presented_token(headers: &HeaderMap) -> Option<String> {
    let x_auth = headers.get(AUTH_HEADER).and_then(|v| v.to_str().ok());
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    x_auth
        .or(bearer)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}
