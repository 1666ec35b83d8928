use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use super::sqlite_repo::{flag_at, optional_instant_at, uuid_at, SqliteStore};
use crate::domain::{
    ids::{TodoId, UserId},
    repository::TodoRepository,
    todo::{Todo, UpdateTodo},
};

const COLUMNS: &str = "id, text, completed, completed_at, creator_id";

#[async_trait]
impl TodoRepository for SqliteStore {
    async fn create(&self, todo: Todo) -> Result<Todo> {
        sqlx::query("INSERT INTO todos (id, text, completed, completed_at, creator_id) VALUES (?1, ?2, ?3, ?4, ?5)")
            .bind(todo.id.to_string())
            .bind(&todo.text)
            .bind(todo.completed)
            .bind(todo.completed_at.map(|d| d.to_rfc3339()))
            .bind(todo.creator_id.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(todo)
    }

    async fn find_one(&self, id: TodoId, owner: UserId) -> Result<Option<Todo>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM todos WHERE id = ?1 AND creator_id = ?2"))
            .bind(id.to_string())
            .bind(owner.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(row_to_todo).transpose()
    }

    async fn list(&self, owner: UserId) -> Result<Vec<Todo>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM todos WHERE creator_id = ?1 ORDER BY rowid"))
            .bind(owner.to_string())
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(row_to_todo).collect()
    }

    async fn find_one_and_update(&self, id: TodoId, owner: UserId, update: UpdateTodo) -> Result<Option<Todo>> {
        let row = sqlx::query(&format!(
            "UPDATE todos SET text = COALESCE(?3, text), completed = ?4, completed_at = ?5
             WHERE id = ?1 AND creator_id = ?2
             RETURNING {COLUMNS}"
        ))
        .bind(id.to_string())
        .bind(owner.to_string())
        .bind(update.text)
        .bind(update.completed)
        .bind(update.completed_at.map(|d| d.to_rfc3339()))
        .fetch_optional(&*self.pool)
        .await?;
        row.as_ref().map(row_to_todo).transpose()
    }

    async fn delete(&self, id: TodoId, owner: UserId) -> Result<Option<Todo>> {
        let row = sqlx::query(&format!("DELETE FROM todos WHERE id = ?1 AND creator_id = ?2 RETURNING {COLUMNS}"))
            .bind(id.to_string())
            .bind(owner.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(row_to_todo).transpose()
    }
}

fn row_to_todo(row: &SqliteRow) -> Result<Todo> {
    Ok(Todo {
        id: TodoId(uuid_at(row, "id")?),
        text: row.try_get("text")?,
        completed: flag_at(row, "completed")?,
        completed_at: optional_instant_at(row, "completed_at")?,
        creator_id: UserId(uuid_at(row, "creator_id")?),
    })
}
