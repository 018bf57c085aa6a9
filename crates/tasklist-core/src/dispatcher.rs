//! The single routing point for user actions.
//!
//! Every branch follows the same order: mutate the view first, then
//! persist through the gateway. The view change is visible before the
//! gateway call resolves, and it is not rolled back when the call
//! fails; the failure is returned to the caller instead.

use std::cell::Cell;

use tasklist_shared::{
  Category,
  TaskCreate,
  TaskPatch
};
use tracing::{
  debug,
  error,
  info,
  instrument,
  warn
};
use uuid::Uuid;

use crate::action::{
  Action,
  CardAction
};
use crate::error::DispatchError;
use crate::gateway::Gateway;
use crate::settings::Settings;
use crate::theme::{
  PreferenceStore,
  Theme
};
use crate::view::{
  CardMode,
  DraftFields,
  View
};

pub struct Dispatcher<G, V, P> {
  pub(crate) gateway:  G,
  pub(crate) view:     V,
  pub(crate) prefs:    P,
  pub(crate) settings: Settings,
  pub(crate) theme:    Cell<Theme>
}

impl<G, V, P> Dispatcher<G, V, P>
where
  G: Gateway,
  V: View,
  P: PreferenceStore
{
  pub fn new(
    gateway: G,
    view: V,
    prefs: P,
    settings: Settings,
    theme: Theme
  ) -> Self {
    Self {
      gateway,
      view,
      prefs,
      settings,
      theme: Cell::new(theme)
    }
  }

  pub fn theme(&self) -> Theme {
    self.theme.get()
  }

  /// Runs `action` and reports a failure through the log and the
  /// view's error banner. The error is still returned so the boundary
  /// can forward it.
  pub async fn handle(
    &self,
    action: Action
  ) -> Result<(), DispatchError> {
    let result =
      self.dispatch(action).await;
    if let Err(err) = result.as_ref() {
      error!(error = %err, action = ?action, "action failed");
      self.view.show_error(&err.to_string());
    }
    result
  }

  #[instrument(skip(self))]
  pub async fn dispatch(
    &self,
    action: Action
  ) -> Result<(), DispatchError> {
    match action {
      | Action::ToggleTheme => {
        self.toggle_theme();
        Ok(())
      }
      | Action::ClearAll => {
        self.clear_all().await
      }
      | Action::Add => self.add().await,
      | Action::Card { id, action } => {
        self.card(id, action).await
      }
    }
  }

  fn toggle_theme(&self) -> Theme {
    let next = self.theme.get().toggled();
    self.theme.set(next);
    self.view.apply_theme(next);

    if let Err(err) = self.prefs.set(
      &self.settings.theme.storage_key,
      next.storage_value()
    ) {
      warn!(error = %err, "failed to persist theme preference");
    }

    self.view.update_theme_icon(next);
    info!(
      theme = next.storage_value(),
      "theme toggled"
    );
    next
  }

  async fn clear_all(
    &self
  ) -> Result<(), DispatchError> {
    if !self.view.confirm(
      &self.settings.prompts.confirm_clear
    ) {
      debug!("clear-all declined");
      return Ok(());
    }

    self.view.clear_all_tasks();

    let tasks = self
      .gateway
      .list_tasks(
        self.settings.clear_filter()
      )
      .await
      .map_err(DispatchError::gateway(
        "load tasks"
      ))?;

    let total = tasks.len();
    for (deleted, task) in
      tasks.iter().enumerate()
    {
      if let Err(source) = self
        .gateway
        .delete_task(task.id)
        .await
      {
        return Err(
          DispatchError::ClearIncomplete {
            deleted,
            total,
            source
          }
        );
      }
    }

    info!(total, "cleared all tasks");
    Ok(())
  }

  async fn add(
    &self
  ) -> Result<(), DispatchError> {
    if !self.view.is_input_form_open() {
      let prefill =
        self.view.scratch_input();
      self.view.open_input_form(&prefill);
      return Ok(());
    }

    let Some(draft) = draft_from_form(
      self.view.read_input_form()
    ) else {
      self.view.alert(
        &self.settings.prompts.title_required
      );
      return Ok(());
    };

    self.view.close_input_form();

    let created = self
      .gateway
      .create_task(draft)
      .await
      .map_err(DispatchError::gateway(
        "create task"
      ))?;

    info!(task = %created.id, "task created");
    self.view.append_task(&created);
    Ok(())
  }

  async fn card(
    &self,
    id: Uuid,
    action: CardAction
  ) -> Result<(), DispatchError> {
    match action {
      | CardAction::SetDone(checked) => {
        let category =
          Category::from_checked(checked);
        self.view.move_card(id, category);
        self
          .gateway
          .update_task(
            id,
            TaskPatch::category(category)
          )
          .await
          .map_err(DispatchError::gateway(
            "update task category"
          ))?;
        debug!(task = %id, category = %category, "category persisted");
      }
      | CardAction::Delete => {
        self.view.remove_card(id);
        self
          .gateway
          .delete_task(id)
          .await
          .map_err(DispatchError::gateway(
            "delete task"
          ))?;
        debug!(task = %id, "task deleted");
      }
      | CardAction::Edit => {
        self
          .view
          .show_card_mode(id, CardMode::Edit)
      }
      | CardAction::View => {
        self.view.show_card_mode(
          id,
          CardMode::Expanded
        )
      }
      | CardAction::Close => {
        self.view.show_card_mode(
          id,
          CardMode::Normal
        )
      }
      | CardAction::Save => {
        let Some(fields) =
          self.view.read_edit_fields(id)
        else {
          warn!(task = %id, "save clicked on a card without edit inputs");
          return Ok(());
        };

        self
          .view
          .update_card_text(id, &fields);
        self.view.show_card_mode(
          id,
          CardMode::Normal
        );

        let patch = TaskPatch {
          title: Some(fields.title),
          duedate: Some(fields.duedate),
          description: Some(
            fields.description
          ),
          category: None
        };
        self
          .gateway
          .update_task(id, patch)
          .await
          .map_err(DispatchError::gateway(
            "save task"
          ))?;
        debug!(task = %id, "task edits persisted");
      }
    }
    Ok(())
  }
}

/// Builds a draft from the form, or `None` when the title is empty.
/// The title is kept exactly as typed.
pub fn draft_from_form(
  fields: DraftFields
) -> Option<TaskCreate> {
  if fields.title.is_empty() {
    return None;
  }

  let duedate = fields.duedate.trim();
  Some(TaskCreate {
    title:       fields.title,
    duedate:     (!duedate.is_empty())
      .then(|| duedate.to_string()),
    description: fields.description,
    category:    Category::InProgress
  })
}
