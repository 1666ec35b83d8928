use anyhow::anyhow;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use crate::domain::ids::UserId;
use crate::domain::repository::UserRepository;
use crate::domain::user::{Credentials, User};

/// Turns a presented bearer credential into the identity every owned query is scoped by.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    async fn verify(&self, credential: &str) -> ServiceResult<User>;
}

#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

#[async_trait]
pub trait AuthService: IdentityProvider {
    async fn register(&self, credentials: Credentials) -> ServiceResult<Session>;
    async fn login(&self, credentials: Credentials) -> ServiceResult<Session>;
    async fn logout(&self, token: &str) -> ServiceResult<()>;
}

#[derive(Clone)]
pub struct AuthServiceImpl<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> AuthServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }

    async fn issue_token(&self, user: User) -> ServiceResult<Session> {
        let token = Uuid::new_v4().simple().to_string();
        self.repo.add_token(user.id, &token).await?;
        Ok(Session { user, token })
    }
}

#[async_trait]
impl<R: UserRepository> IdentityProvider for AuthServiceImpl<R> {
    async fn verify(&self, credential: &str) -> ServiceResult<User> {
        self.repo.find_by_token(credential).await?.ok_or(ServiceError::Authentication)
    }
}

#[async_trait]
impl<R: UserRepository> AuthService for AuthServiceImpl<R> {
    async fn register(&self, credentials: Credentials) -> ServiceResult<Session> {
        credentials.validate_new()?;
        let Credentials { email, password } = credentials;
        let password_hash = blocking(move || hash_password(&password)).await?;
        let user = User { id: UserId::new(), email, password_hash };
        let Some(user) = self.repo.create(user).await? else {
            return Err(ServiceError::Validation("email already in use".into()));
        };
        tracing::info!(user = %user.id, "user registered");
        self.issue_token(user).await
    }

    async fn login(&self, credentials: Credentials) -> ServiceResult<Session> {
        let rejected = || ServiceError::Validation("invalid email or password".into());
        let user = self.repo.find_by_email(&credentials.email).await?.ok_or_else(rejected)?;
        let stored = user.password_hash.clone();
        let Credentials { password, .. } = credentials;
        if !blocking(move || Ok(verify_password(&password, &stored))).await? {
            tracing::debug!(user = %user.id, "rejected login");
            return Err(rejected());
        }
        self.issue_token(user).await
    }

    async fn logout(&self, token: &str) -> ServiceResult<()> {
        if self.repo.remove_token(token).await? { Ok(()) } else { Err(ServiceError::Authentication) }
    }
}

async fn blocking<T: Send + 'static>(f: impl FnOnce() -> anyhow::Result<T> + Send + 'static) -> anyhow::Result<T> {
    tokio::task::spawn_blocking(f).await?
}

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes()).map_err(|e| anyhow!("salt: {e}"))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("hash: {e}"))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}
