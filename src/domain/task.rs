use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{MalformedId, ProjectId, TaskId, UserId};
use super::patch::{self, Body, PatchError};

pub const DEFAULT_ESTIMATED_TIME: &str = "00:00:00";
/// Upper bound on a stored `elapsedTime`: one hundred years of seconds.
pub const MAX_ELAPSED_SECONDS: i64 = 100 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: Option<String>,
    pub description: Option<String>,
    /// When the task last entered the running state.
    pub start_date: Option<DateTime<Utc>>,
    pub is_paused: bool,
    /// Seconds, `None` until the first pause.
    pub elapsed_time: Option<i64>,
    pub estimated_time: String,
    pub creator_id: UserId,
    pub project_id: ProjectId,
}

impl Task {
    /// Builds a fresh record. `startDate` is stamped with `now` whatever the requested state.
    pub fn new(creator_id: UserId, input: CreateTask, now: DateTime<Utc>) -> Self {
        Self {
            id: TaskId::new(),
            name: input.name,
            description: input.description,
            start_date: Some(now),
            is_paused: input.is_paused.unwrap_or(true),
            elapsed_time: None,
            estimated_time: input.estimated_time.unwrap_or_else(|| DEFAULT_ESTIMATED_TIME.to_string()),
            creator_id,
            project_id: input.project_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTask {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_paused: Option<bool>,
    pub estimated_time: Option<String>,
    pub project_id: ProjectId,
}

impl CreateTask {
    /// Reads a creation body. The owning project may be sent as `project` or `projectId`;
    /// any `creatorId` in the body is ignored.
    pub fn from_request(body: &Body) -> Result<Self, PatchError> {
        let raw_project = match patch::text(body, "project")? {
            Some(p) => Some(p),
            None => patch::text(body, "projectId")?,
        };
        let project_id = raw_project
            .ok_or(PatchError::Missing("projectId"))
            .and_then(|p| {
                ProjectId::parse(&p).map_err(|MalformedId(_)| PatchError::InvalidField {
                    field: "projectId",
                    expected: "a valid identifier",
                })
            })?;
        Ok(Self {
            name: patch::text(body, "name")?,
            description: patch::text(body, "description")?,
            is_paused: patch::flag(body, "isPaused")?,
            estimated_time: patch::text(body, "estimatedTime")?,
            project_id,
        })
    }
}

/// The only task fields a client may change after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub is_paused: Option<bool>,
    pub elapsed_time: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl TaskPatch {
    pub fn from_request(body: &Body) -> Result<Self, PatchError> {
        Ok(Self {
            is_paused: patch::flag(body, "isPaused")?,
            elapsed_time: patch::seconds(body, "elapsedTime", MAX_ELAPSED_SECONDS)?,
            start_date: patch::instant(body, "startDate")?,
            name: patch::text(body, "name")?,
            description: patch::text(body, "description")?,
        })
    }

    /// `$set` semantics: only present fields overwrite.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(p) = self.is_paused { task.is_paused = p; }
        if let Some(e) = self.elapsed_time { task.elapsed_time = Some(e); }
        if let Some(s) = self.start_date { task.start_date = Some(s); }
        if let Some(n) = &self.name { task.name = Some(n.clone()); }
        if let Some(d) = &self.description { task.description = Some(d.clone()); }
    }
}
