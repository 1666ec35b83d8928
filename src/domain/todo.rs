use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{TodoId, UserId};
use super::patch::{self, Body, PatchError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub creator_id: UserId,
}

impl Todo {
    pub fn new(creator_id: UserId, input: CreateTodo) -> Self {
        Self { id: TodoId::new(), text: input.text, completed: false, completed_at: None, creator_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodo {
    pub text: String,
}

impl CreateTodo {
    pub fn from_request(body: &Body) -> Result<Self, PatchError> {
        match patch::text(body, "text")? {
            Some(text) if !text.is_empty() => Ok(Self { text }),
            _ => Err(PatchError::Missing("text")),
        }
    }
}

/// Finalized todo update. Completion is always written: either stamped or cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodo {
    pub text: Option<String>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl UpdateTodo {
    /// Anything other than `completed: true` marks the todo as not completed.
    pub fn from_request(body: &Body, now: DateTime<Utc>) -> Result<Self, PatchError> {
        let text = patch::text(body, "text")?;
        if text.as_deref() == Some("") {
            return Err(PatchError::Missing("text"));
        }
        let completed = patch::flag(body, "completed")?.unwrap_or(false);
        Ok(Self { text, completed, completed_at: completed.then_some(now) })
    }

    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(t) = &self.text { todo.text = t.clone(); }
        todo.completed = self.completed;
        todo.completed_at = self.completed_at;
    }
}
