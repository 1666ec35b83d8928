use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Foreign key a time summary groups tasks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskGroupField {
    Project,
    Creator,
}

impl TaskGroupField {
    pub fn column(self) -> &'static str {
        match self {
            Self::Project => "project_id",
            Self::Creator => "creator_id",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ElapsedTimeSummary {
    pub id: Uuid,
    pub total_time_elapsed: i64,
}
