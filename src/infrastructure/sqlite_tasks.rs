use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use super::sqlite_repo::{flag_at, optional_instant_at, uuid_at, SqliteStore};
use crate::domain::{
    ids::{ProjectId, TaskId, UserId},
    repository::TaskRepository,
    summary::{ElapsedTimeSummary, TaskGroupField},
    task::{Task, TaskPatch},
};

const COLUMNS: &str = "id, name, description, start_date, is_paused, elapsed_time, estimated_time, creator_id, project_id";

#[async_trait]
impl TaskRepository for SqliteStore {
    async fn create(&self, task: Task) -> Result<Task> {
        sqlx::query(
            "INSERT INTO tasks (id, name, description, start_date, is_paused, elapsed_time, estimated_time, creator_id, project_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(task.id.to_string())
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.start_date.map(|d| d.to_rfc3339()))
        .bind(task.is_paused)
        .bind(task.elapsed_time)
        .bind(&task.estimated_time)
        .bind(task.creator_id.to_string())
        .bind(task.project_id.to_string())
        .execute(&*self.pool)
        .await?;
        Ok(task)
    }

    async fn find_one(&self, id: TaskId, owner: UserId) -> Result<Option<Task>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM tasks WHERE id = ?1 AND creator_id = ?2"))
            .bind(id.to_string())
            .bind(owner.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(row_to_task).transpose()
    }

    async fn list(&self, owner: UserId) -> Result<Vec<Task>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM tasks WHERE creator_id = ?1 ORDER BY rowid"))
            .bind(owner.to_string())
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(row_to_task).collect()
    }

    async fn find_one_and_update(&self, id: TaskId, owner: UserId, patch: TaskPatch) -> Result<Option<Task>> {
        let row = sqlx::query(&format!(
            "UPDATE tasks SET
                name = COALESCE(?3, name),
                description = COALESCE(?4, description),
                start_date = COALESCE(?5, start_date),
                is_paused = COALESCE(?6, is_paused),
                elapsed_time = COALESCE(?7, elapsed_time)
             WHERE id = ?1 AND creator_id = ?2
             RETURNING {COLUMNS}"
        ))
        .bind(id.to_string())
        .bind(owner.to_string())
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.start_date.map(|d| d.to_rfc3339()))
        .bind(patch.is_paused)
        .bind(patch.elapsed_time)
        .fetch_optional(&*self.pool)
        .await?;
        row.as_ref().map(row_to_task).transpose()
    }

    async fn delete(&self, id: TaskId, owner: UserId) -> Result<Option<Task>> {
        let row = sqlx::query(&format!("DELETE FROM tasks WHERE id = ?1 AND creator_id = ?2 RETURNING {COLUMNS}"))
            .bind(id.to_string())
            .bind(owner.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(row_to_task).transpose()
    }

    async fn aggregate_sum_by_group(&self, group: TaskGroupField, owner: Option<UserId>) -> Result<Vec<ElapsedTimeSummary>> {
        let column = group.column();
        let rows = sqlx::query(&format!(
            "SELECT {column} AS group_id, COALESCE(SUM(elapsed_time), 0) AS total
             FROM tasks
             WHERE ?1 IS NULL OR creator_id = ?1
             GROUP BY {column}
             ORDER BY {column}"
        ))
        .bind(owner.map(|o| o.to_string()))
        .fetch_all(&*self.pool)
        .await?;
        rows.iter()
            .map(|row| -> Result<ElapsedTimeSummary> {
                Ok(ElapsedTimeSummary { id: uuid_at(row, "group_id")?, total_time_elapsed: row.try_get("total")? })
            })
            .collect()
    }
}

fn row_to_task(row: &SqliteRow) -> Result<Task> {
    Ok(Task {
        id: TaskId(uuid_at(row, "id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        start_date: optional_instant_at(row, "start_date")?,
        is_paused: flag_at(row, "is_paused")?,
        elapsed_time: row.try_get("elapsed_time")?,
        estimated_time: row.try_get("estimated_time")?,
        creator_id: UserId(uuid_at(row, "creator_id")?),
        project_id: ProjectId(uuid_at(row, "project_id")?),
    })
}
