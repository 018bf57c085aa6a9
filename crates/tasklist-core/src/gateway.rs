use std::rc::Rc;

use tasklist_shared::{
  TaskCreate,
  TaskDto,
  TaskPatch
};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
  #[error("failed to encode request: {0}")]
  Encode(String),

  #[error("backend call failed: {0}")]
  Invoke(String),

  #[error("failed to decode response: {0}")]
  Decode(String),

  #[error("backend rejected request: {0}")]
  Rejected(String)
}

/// Task persistence as seen from the frontend.
///
/// Calls run on the single UI thread, so implementations may hold
/// `Rc`/`RefCell` state and their futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Gateway {
  async fn list_tasks(
    &self,
    filter: Option<&str>
  ) -> Result<Vec<TaskDto>, GatewayError>;

  /// Persists a draft and returns it with the backend-assigned id.
  async fn create_task(
    &self,
    draft: TaskCreate
  ) -> Result<TaskDto, GatewayError>;

  async fn update_task(
    &self,
    id: Uuid,
    patch: TaskPatch
  ) -> Result<(), GatewayError>;

  async fn delete_task(
    &self,
    id: Uuid
  ) -> Result<(), GatewayError>;
}

impl<G: Gateway> Gateway for Rc<G> {
  async fn list_tasks(
    &self,
    filter: Option<&str>
  ) -> Result<Vec<TaskDto>, GatewayError>
  {
    self.as_ref().list_tasks(filter).await
  }

  async fn create_task(
    &self,
    draft: TaskCreate
  ) -> Result<TaskDto, GatewayError> {
    self.as_ref().create_task(draft).await
  }

  async fn update_task(
    &self,
    id: Uuid,
    patch: TaskPatch
  ) -> Result<(), GatewayError> {
    self
      .as_ref()
      .update_task(id, patch)
      .await
  }

  async fn delete_task(
    &self,
    id: Uuid
  ) -> Result<(), GatewayError> {
    self.as_ref().delete_task(id).await
  }
}
