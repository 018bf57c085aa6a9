use serde::Serialize;
use tasklist_core::{
  Gateway,
  GatewayError
};
use tasklist_shared::{
  TaskCreate,
  TaskDto,
  TaskIdArg,
  TaskPatch,
  TaskUpdateArgs,
  TasksListArgs
};
use tracing::{
  debug,
  warn
};
use uuid::Uuid;

use crate::api::invoke_tauri;

/// Every backend command takes a single parameter named `args`.
#[derive(Serialize)]
struct Payload<'a, T> {
  args: &'a T
}

#[derive(Serialize)]
struct UiLogArg<'a> {
  event:  &'a str,
  detail: &'a str
}

/// [`Gateway`] over the desktop backend's Tauri commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct TauriGateway;

impl TauriGateway {
  async fn call<R, T>(
    &self,
    cmd: &str,
    args: &T
  ) -> Result<R, GatewayError>
  where
    R: serde::de::DeserializeOwned,
    T: Serialize
  {
    debug!(cmd, "invoking backend command");
    invoke_tauri(cmd, &Payload { args })
      .await
  }
}

impl Gateway for TauriGateway {
  async fn list_tasks(
    &self,
    filter: Option<&str>
  ) -> Result<Vec<TaskDto>, GatewayError>
  {
    let args = TasksListArgs {
      query: filter.map(str::to_string)
    };
    self.call("tasks_list", &args).await
  }

  async fn create_task(
    &self,
    draft: TaskCreate
  ) -> Result<TaskDto, GatewayError> {
    self.call("task_add", &draft).await
  }

  async fn update_task(
    &self,
    id: Uuid,
    patch: TaskPatch
  ) -> Result<(), GatewayError> {
    let args = TaskUpdateArgs { id, patch };
    let _: TaskDto = self
      .call("task_update", &args)
      .await?;
    Ok(())
  }

  async fn delete_task(
    &self,
    id: Uuid
  ) -> Result<(), GatewayError> {
    self
      .call("task_delete", &TaskIdArg {
        id
      })
      .await
  }
}

/// Forwards a frontend failure to the backend log. Best effort: a
/// failure here is only logged locally.
pub async fn report_ui_event(
  event: &str,
  detail: &str
) {
  let args = UiLogArg { event, detail };
  let result: Result<(), GatewayError> =
    invoke_tauri("ui_log", &Payload {
      args: &args
    })
    .await;
  if let Err(err) = result {
    warn!(error = %err, event, "failed to forward ui event");
  }
}
