use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use super::sqlite_repo::{instant_at, uuid_at, SqliteStore};
use crate::domain::{
    ids::{ProjectId, UserId},
    project::{Project, ProjectPatch},
    repository::ProjectRepository,
};

const COLUMNS: &str = "id, name, description, creation_date, creator_id";

#[async_trait]
impl ProjectRepository for SqliteStore {
    async fn create(&self, project: Project) -> Result<Project> {
        sqlx::query("INSERT INTO projects (id, name, description, creation_date, creator_id) VALUES (?1, ?2, ?3, ?4, ?5)")
            .bind(project.id.to_string())
            .bind(&project.name)
            .bind(&project.description)
            .bind(project.creation_date.to_rfc3339())
            .bind(project.creator_id.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(project)
    }

    async fn find_one(&self, id: ProjectId, owner: UserId) -> Result<Option<Project>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM projects WHERE id = ?1 AND creator_id = ?2"))
            .bind(id.to_string())
            .bind(owner.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(row_to_project).transpose()
    }

    async fn list(&self, owner: UserId) -> Result<Vec<Project>> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM projects WHERE creator_id = ?1 ORDER BY creation_date"))
            .bind(owner.to_string())
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(row_to_project).collect()
    }

    async fn find_one_and_update(&self, id: ProjectId, owner: UserId, patch: ProjectPatch) -> Result<Option<Project>> {
        let row = sqlx::query(&format!(
            "UPDATE projects SET name = COALESCE(?3, name), description = COALESCE(?4, description)
             WHERE id = ?1 AND creator_id = ?2
             RETURNING {COLUMNS}"
        ))
        .bind(id.to_string())
        .bind(owner.to_string())
        .bind(patch.name)
        .bind(patch.description)
        .fetch_optional(&*self.pool)
        .await?;
        row.as_ref().map(row_to_project).transpose()
    }

    async fn delete(&self, id: ProjectId, owner: UserId) -> Result<Option<Project>> {
        let row = sqlx::query(&format!("DELETE FROM projects WHERE id = ?1 AND creator_id = ?2 RETURNING {COLUMNS}"))
            .bind(id.to_string())
            .bind(owner.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.as_ref().map(row_to_project).transpose()
    }
}

fn row_to_project(row: &SqliteRow) -> Result<Project> {
    Ok(Project {
        id: ProjectId(uuid_at(row, "id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        creation_date: instant_at(row, "creation_date")?,
        creator_id: UserId(uuid_at(row, "creator_id")?),
    })
}
