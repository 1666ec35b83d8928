use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};

use super::sqlite_repo::{uuid_at, SqliteStore};
use crate::domain::{ids::UserId, repository::UserRepository, user::User};

#[async_trait]
impl UserRepository for SqliteStore {
    async fn create(&self, user: User) -> Result<Option<User>> {
        let result = sqlx::query("INSERT INTO users (id, email, password_hash) VALUES (?1, ?2, ?3) ON CONFLICT(email) DO NOTHING")
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(&*self.pool)
            .await?;
        Ok((result.rows_affected() > 0).then_some(user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, email, password_hash FROM users WHERE email = ?1")
            .bind(email)
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT u.id, u.email, u.password_hash FROM users u
             JOIN user_tokens t ON t.user_id = u.id
             WHERE t.token = ?1 AND t.access = 'auth'",
        )
        .bind(token)
        .fetch_optional(&*self.pool)
        .await?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn add_token(&self, user: UserId, token: &str) -> Result<()> {
        sqlx::query("INSERT INTO user_tokens (token, user_id, access, created_at) VALUES (?1, ?2, 'auth', ?3)")
            .bind(token)
            .bind(user.to_string())
            .bind(Utc::now().to_rfc3339())
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn remove_token(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_tokens WHERE token = ?1")
            .bind(token)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_user(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: UserId(uuid_at(row, "id")?),
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
    })
}
