use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklist_shared::{Category, TaskDto};
use uuid::Uuid;

/// One line of `tasks.data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRecord {
    pub id: Uuid,

    pub title: String,

    #[serde(default)]
    pub duedate: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: Category,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

impl TaskRecord {
    pub fn into_dto(self) -> TaskDto {
        TaskDto {
            id: self.id,
            title: self.title,
            duedate: self.duedate,
            description: self.description,
            category: self.category,
        }
    }
}
