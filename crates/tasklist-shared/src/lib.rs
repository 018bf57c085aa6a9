use std::fmt;

use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

/// Visual group a task card lives in.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub enum Category {
  #[default]
  #[serde(rename = "In-progress")]
  InProgress,
  #[serde(rename = "Done")]
  Done
}

impl Category {
  pub fn from_checked(
    checked: bool
  ) -> Self {
    if checked {
      Self::Done
    } else {
      Self::InProgress
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      | Self::InProgress => {
        "In-progress"
      }
      | Self::Done => "Done"
    }
  }

  pub fn is_done(self) -> bool {
    self == Self::Done
  }
}

impl fmt::Display for Category {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskDto {
  pub id:          Uuid,
  #[serde(default)]
  pub title:       String,
  #[serde(default)]
  pub duedate:     Option<String>,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub category:    Category
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
)]
pub struct TasksListArgs {
  pub query: Option<String>
}

/// A task as built on the client, before the backend assigns an id.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskCreate {
  pub title:       String,
  #[serde(default)]
  pub duedate:     Option<String>,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub category:    Category
}

/// Partial update. Absent fields are left untouched and never sent.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
  PartialEq,
)]
pub struct TaskPatch {
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub title:       Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub duedate:     Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub description: Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub category:    Option<Category>
}

impl TaskPatch {
  pub fn category(
    category: Category
  ) -> Self {
    Self {
      category: Some(category),
      ..Self::default()
    }
  }

  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.duedate.is_none()
      && self.description.is_none()
      && self.category.is_none()
  }
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskIdArg {
  pub id: Uuid
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskUpdateArgs {
  pub id:    Uuid,
  pub patch: TaskPatch
}
