use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ProjectId, UserId};
use super::patch::{self, Body, PatchError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub creation_date: DateTime<Utc>,
    pub creator_id: UserId,
}

impl Project {
    pub fn new(creator_id: UserId, input: ProjectPatch, now: DateTime<Utc>) -> Self {
        Self {
            id: ProjectId::new(),
            name: input.name,
            description: input.description,
            creation_date: now,
            creator_id,
        }
    }
}

/// Mutable project fields; also the creation body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProjectPatch {
    pub fn from_request(body: &Body) -> Result<Self, PatchError> {
        Ok(Self {
            name: patch::text(body, "name")?,
            description: patch::text(body, "description")?,
        })
    }

    pub fn apply_to(&self, project: &mut Project) {
        if let Some(n) = &self.name { project.name = Some(n.clone()); }
        if let Some(d) = &self.description { project.description = Some(d.clone()); }
    }
}
