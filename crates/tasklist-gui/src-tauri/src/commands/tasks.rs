use serde::Deserialize;
use tasklist_shared::{
  TaskCreate,
  TaskDto,
  TaskIdArg,
  TaskUpdateArgs,
  TasksListArgs
};
use tauri::State;
use tracing::{
  error,
  info,
  instrument,
  warn
};

use crate::state::AppState;

fn err_to_string(
  err: anyhow::Error
) -> String {
  format!("{err:#}")
}

#[tauri::command]
#[instrument(skip(state), fields(query = ?args.query))]
pub async fn tasks_list(
  state: State<'_, AppState>,
  args: TasksListArgs
) -> Result<Vec<TaskDto>, String> {
  info!(
    query = ?args.query,
    "tasks_list command invoked"
  );
  let result = state.list(args);
  if let Err(err) = result.as_ref() {
    error!(error = %err, "tasks_list command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(title_len = args.title.len(), description_len = args.description.len()))]
pub async fn task_add(
  state: State<'_, AppState>,
  args: TaskCreate
) -> Result<TaskDto, String> {
  info!(
    title_len = args.title.len(),
    description_len =
      args.description.len(),
    has_due = args.duedate.is_some(),
    category = %args.category,
    "task_add command invoked"
  );
  let result = state.add(args);
  if let Err(err) = result.as_ref() {
    error!(error = %err, "task_add command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(id = %args.id))]
pub async fn task_update(
  state: State<'_, AppState>,
  args: TaskUpdateArgs
) -> Result<TaskDto, String> {
  info!(
    id = %args.id,
    category = ?args.patch.category,
    edits_text = args.patch.title.is_some(),
    "task_update command invoked"
  );
  if args.patch.is_empty() {
    warn!(id = %args.id, "task_update received an empty patch");
  }
  let result = state.update(args);
  if let Err(err) = result.as_ref() {
    error!(error = %err, "task_update command failed");
  }
  result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(id = %args.id))]
pub async fn task_delete(
  state: State<'_, AppState>,
  args: TaskIdArg
) -> Result<(), String> {
  info!(id = %args.id, "task_delete command invoked");
  let result = state.delete(args.id);
  if let Err(err) = result.as_ref() {
    error!(error = %err, "task_delete command failed");
  }
  result.map_err(err_to_string)
}

#[derive(Debug, Deserialize)]
pub struct UiLogArg {
  pub event:  String,
  pub detail: String
}

#[tauri::command]
#[instrument(fields(event = %args.event))]
pub async fn ui_log(
  args: UiLogArg
) -> Result<(), String> {
  warn!(event = %args.event, detail = %args.detail, "ui reported failure");
  Ok(())
}
