use std::rc::Rc;

use tasklist_shared::{
  Category,
  TaskDto
};
use uuid::Uuid;

use crate::theme::Theme;

/// Display mode of a single card, independent of its category group.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
  Default,
)]
pub enum CardMode {
  #[default]
  Normal,
  Edit,
  Expanded
}

/// Values typed into the "new task" form.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct DraftFields {
  pub title:       String,
  pub duedate:     String,
  pub description: String
}

/// Values typed into a card's edit inputs.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct EditFields {
  pub title:       String,
  pub duedate:     String,
  pub description: String
}

/// Everything the dispatcher needs from the page.
///
/// Mutations take effect immediately and synchronously. Cards are
/// addressed by task id; calls naming a card that is not on the page
/// are ignored by implementations.
pub trait View {
  fn initial_render(
    &self,
    tasks: &[TaskDto]
  );

  fn append_task(&self, task: &TaskDto);

  fn clear_all_tasks(&self);

  fn move_card(
    &self,
    id: Uuid,
    category: Category
  );

  fn remove_card(&self, id: Uuid);

  fn show_card_mode(
    &self,
    id: Uuid,
    mode: CardMode
  );

  fn update_card_text(
    &self,
    id: Uuid,
    fields: &EditFields
  );

  fn read_edit_fields(
    &self,
    id: Uuid
  ) -> Option<EditFields>;

  fn is_input_form_open(&self) -> bool;

  /// Current value of the quick-entry input above the lists.
  fn scratch_input(&self) -> String;

  fn open_input_form(
    &self,
    prefill: &str
  );

  fn read_input_form(
    &self
  ) -> DraftFields;

  /// Closes the form and removes it from the page.
  fn close_input_form(&self);

  fn apply_theme(&self, theme: Theme);

  fn update_theme_icon(
    &self,
    theme: Theme
  );

  /// Blocking yes/no prompt.
  fn confirm(&self, message: &str) -> bool;

  /// Blocking notice.
  fn alert(&self, message: &str);

  /// Non-blocking inline error banner.
  fn show_error(&self, message: &str);
}

impl<V: View> View for Rc<V> {
  fn initial_render(
    &self,
    tasks: &[TaskDto]
  ) {
    self.as_ref().initial_render(tasks)
  }

  fn append_task(&self, task: &TaskDto) {
    self.as_ref().append_task(task)
  }

  fn clear_all_tasks(&self) {
    self.as_ref().clear_all_tasks()
  }

  fn move_card(
    &self,
    id: Uuid,
    category: Category
  ) {
    self.as_ref().move_card(id, category)
  }

  fn remove_card(&self, id: Uuid) {
    self.as_ref().remove_card(id)
  }

  fn show_card_mode(
    &self,
    id: Uuid,
    mode: CardMode
  ) {
    self.as_ref().show_card_mode(id, mode)
  }

  fn update_card_text(
    &self,
    id: Uuid,
    fields: &EditFields
  ) {
    self
      .as_ref()
      .update_card_text(id, fields)
  }

  fn read_edit_fields(
    &self,
    id: Uuid
  ) -> Option<EditFields> {
    self.as_ref().read_edit_fields(id)
  }

  fn is_input_form_open(&self) -> bool {
    self.as_ref().is_input_form_open()
  }

  fn scratch_input(&self) -> String {
    self.as_ref().scratch_input()
  }

  fn open_input_form(
    &self,
    prefill: &str
  ) {
    self.as_ref().open_input_form(prefill)
  }

  fn read_input_form(
    &self
  ) -> DraftFields {
    self.as_ref().read_input_form()
  }

  fn close_input_form(&self) {
    self.as_ref().close_input_form()
  }

  fn apply_theme(&self, theme: Theme) {
    self.as_ref().apply_theme(theme)
  }

  fn update_theme_icon(
    &self,
    theme: Theme
  ) {
    self.as_ref().update_theme_icon(theme)
  }

  fn confirm(&self, message: &str) -> bool {
    self.as_ref().confirm(message)
  }

  fn alert(&self, message: &str) {
    self.as_ref().alert(message)
  }

  fn show_error(&self, message: &str) {
    self.as_ref().show_error(message)
  }
}
