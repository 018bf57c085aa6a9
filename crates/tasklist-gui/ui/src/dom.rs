use tasklist_core::theme::DARK_THEME_CLASS;
use tasklist_core::{
  ActionKind,
  CardMode,
  DraftFields,
  EditFields,
  Theme,
  View
};
use tasklist_shared::{
  Category,
  TaskDto
};
use tracing::{
  debug,
  warn
};
use uuid::Uuid;
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Document,
  Element,
  HtmlInputElement,
  HtmlTextAreaElement
};

use crate::format::format_due;

pub const IN_PROGRESS_LIST_ID: &str =
  "in-progress-list";
pub const DONE_LIST_ID: &str =
  "done-list";
pub const SCRATCH_INPUT_ID: &str =
  "input";
pub const FORM_SLOT_ID: &str =
  "input-form-slot";
pub const ERROR_BANNER_ID: &str =
  "error-banner";
pub const THEME_ICON_ID: &str =
  "theme-icon";
pub const CARD_CLASS: &str = "task-card";
pub const INSERT_FORM_CLASS: &str =
  "insertForm";

type DomResult<T> = Result<T, JsValue>;

/// [`View`] over the live document.
///
/// Card markup:
///
/// ```html
/// <li class="task-card" data-id="…" data-due="2026-10-14" data-mode="normal">
///   <div class="card-normal">…checkbox, title, due, view/edit/delete</div>
///   <div class="card-expanded" hidden>…description, close</div>
///   <div class="card-edit" hidden>…edit inputs, save/cancel</div>
/// </li>
/// ```
pub struct DomView {
  document: Document
}

impl DomView {
  pub fn new(document: Document) -> Self {
    Self { document }
  }

  fn by_id(
    &self,
    id: &str
  ) -> Option<Element> {
    self.document.get_element_by_id(id)
  }

  fn list_for(
    &self,
    category: Category
  ) -> Option<Element> {
    let id = if category.is_done() {
      DONE_LIST_ID
    } else {
      IN_PROGRESS_LIST_ID
    };
    self.by_id(id)
  }

  fn card(
    &self,
    id: Uuid
  ) -> Option<Element> {
    let selector = format!(
      ".{CARD_CLASS}[data-id=\"{id}\"]"
    );
    self
      .document
      .query_selector(&selector)
      .ok()
      .flatten()
  }

  fn element(
    &self,
    tag: &str,
    class: &str
  ) -> DomResult<Element> {
    let element =
      self.document.create_element(tag)?;
    if !class.is_empty() {
      element.set_class_name(class);
    }
    Ok(element)
  }

  fn button(
    &self,
    action: ActionKind,
    label: &str
  ) -> DomResult<Element> {
    let button =
      self.element("button", "")?;
    button.set_attribute("type", "button")?;
    button.set_attribute(
      "data-action",
      action.as_str()
    )?;
    button.set_text_content(Some(label));
    Ok(button)
  }

  fn input(
    &self,
    class: &str,
    kind: &str,
    value: &str
  ) -> DomResult<HtmlInputElement> {
    let input = self
      .element("input", class)?
      .dyn_into::<HtmlInputElement>()?;
    input.set_type(kind);
    input.set_value(value);
    Ok(input)
  }

  fn textarea(
    &self,
    class: &str,
    value: &str
  ) -> DomResult<HtmlTextAreaElement> {
    let area = self
      .element("textarea", class)?
      .dyn_into::<HtmlTextAreaElement>()?;
    area.set_value(value);
    Ok(area)
  }

  fn build_card(
    &self,
    task: &TaskDto
  ) -> DomResult<Element> {
    let card = self.element("li", CARD_CLASS)?;
    card.set_attribute(
      "data-id",
      &task.id.to_string()
    )?;
    card.set_attribute(
      "data-due",
      task.duedate.as_deref().unwrap_or("")
    )?;
    card.set_attribute("data-mode", "normal")?;

    let normal =
      self.element("div", "card-normal")?;
    let check = self.input(
      "check-btn",
      "checkbox",
      ""
    )?;
    check.set_checked(task.category.is_done());
    check.set_attribute(
      "data-action",
      ActionKind::Check.as_str()
    )?;
    normal.append_child(&check)?;

    let title =
      self.element("span", "card-title")?;
    title.set_text_content(Some(&task.title));
    normal.append_child(&title)?;

    let due = self.element("span", "card-due")?;
    due.set_text_content(Some(&format_due(
      task.duedate.as_deref()
    )));
    normal.append_child(&due)?;

    normal.append_child(
      &self.button(ActionKind::View, "More")?.into()
    )?;
    normal.append_child(
      &self.button(ActionKind::Edit, "Edit")?.into()
    )?;
    normal.append_child(&self.button(
      ActionKind::Delete,
      "Delete"
    )?.into())?;
    card.append_child(&normal)?;

    let expanded =
      self.element("div", "card-expanded")?;
    expanded.set_attribute("hidden", "")?;
    let desc = self.element("p", "card-desc")?;
    desc.set_text_content(Some(
      &task.description
    ));
    expanded.append_child(&desc)?;
    expanded.append_child(&self.button(
      ActionKind::HideView,
      "Close"
    )?.into())?;
    card.append_child(&expanded)?;

    let edit =
      self.element("div", "card-edit")?;
    edit.set_attribute("hidden", "")?;
    edit.append_child(&self.input(
      "edit-title",
      "text",
      &task.title
    )?.into())?;
    edit.append_child(&self.input(
      "edit-date",
      "date",
      task.duedate.as_deref().unwrap_or("")
    )?.into())?;
    edit.append_child(&self.textarea(
      "edit-desc",
      &task.description
    )?.into())?;
    edit.append_child(
      &self.button(ActionKind::Save, "Save")?.into()
    )?;
    edit.append_child(&self.button(
      ActionKind::CancelEdit,
      "Cancel"
    )?.into())?;
    card.append_child(&edit)?;

    Ok(card)
  }

  fn insert_card(
    &self,
    task: &TaskDto
  ) -> DomResult<()> {
    let Some(list) =
      self.list_for(task.category)
    else {
      warn!(category = %task.category, "task list container missing");
      return Ok(());
    };
    let card = self.build_card(task)?;
    list.append_child(&card)?;
    Ok(())
  }

  fn set_mode(
    &self,
    card: &Element,
    mode: CardMode
  ) -> DomResult<()> {
    if mode == CardMode::Edit {
      self.prefill_edit_inputs(card)?;
    }
    let panes = [
      ("card-normal", CardMode::Normal),
      ("card-expanded", CardMode::Expanded),
      ("card-edit", CardMode::Edit)
    ];
    for (class, pane_mode) in panes {
      if let Some(pane) = card
        .query_selector(&format!(".{class}"))?
      {
        pane.toggle_attribute_with_force(
          "hidden",
          pane_mode != mode
        )?;
      }
    }
    card.set_attribute(
      "data-mode",
      mode_name(mode)
    )?;
    Ok(())
  }

  /// Edit inputs start from the card's current text, so a cancelled
  /// edit leaves nothing behind for the next one.
  fn prefill_edit_inputs(
    &self,
    card: &Element
  ) -> DomResult<()> {
    let title = text_of(card, ".card-title");
    let desc = text_of(card, ".card-desc");
    let due = card
      .get_attribute("data-due")
      .unwrap_or_default();
    set_field(card, ".edit-title", &title)?;
    set_field(card, ".edit-date", &due)?;
    set_field(card, ".edit-desc", &desc)?;
    Ok(())
  }

  fn write_card_text(
    card: &Element,
    fields: &EditFields
  ) -> DomResult<()> {
    card.set_attribute(
      "data-due",
      fields.duedate.trim()
    )?;
    if let Some(title) =
      card.query_selector(".card-title")?
    {
      title
        .set_text_content(Some(&fields.title));
    }
    if let Some(due) =
      card.query_selector(".card-due")?
    {
      due.set_text_content(Some(&format_due(
        Some(&fields.duedate)
      )));
    }
    if let Some(desc) =
      card.query_selector(".card-desc")?
    {
      desc.set_text_content(Some(
        &fields.description
      ));
    }
    Ok(())
  }

  fn build_input_form(
    &self,
    prefill: &str
  ) -> DomResult<Element> {
    let form =
      self.element("form", INSERT_FORM_CLASS)?;
    form.append_child(
      &self.input("title", "text", prefill)?.into()
    )?;
    form.append_child(
      &self.input("duedate", "date", "")?.into()
    )?;
    form.append_child(
      &self.textarea("desc", "")?.into()
    )?;
    let submit =
      self.button(ActionKind::Add, "Save task")?;
    submit.set_attribute("type", "submit")?;
    form.append_child(&submit)?;
    Ok(form)
  }

  fn input_form(&self) -> Option<Element> {
    self
      .document
      .query_selector(&format!(
        ".{INSERT_FORM_CLASS}"
      ))
      .ok()
      .flatten()
  }
}

fn mode_name(mode: CardMode) -> &'static str {
  match mode {
    | CardMode::Normal => "normal",
    | CardMode::Edit => "edit",
    | CardMode::Expanded => "expanded"
  }
}

fn text_of(
  root: &Element,
  selector: &str
) -> String {
  root
    .query_selector(selector)
    .ok()
    .flatten()
    .and_then(|el| el.text_content())
    .unwrap_or_default()
}

/// Value of the input or textarea matched by `selector` under `root`.
fn field_value(
  root: &Element,
  selector: &str
) -> Option<String> {
  let element = root
    .query_selector(selector)
    .ok()
    .flatten()?;
  if let Some(input) =
    element.dyn_ref::<HtmlInputElement>()
  {
    return Some(input.value());
  }
  element
    .dyn_ref::<HtmlTextAreaElement>()
    .map(HtmlTextAreaElement::value)
}

fn set_field(
  root: &Element,
  selector: &str,
  value: &str
) -> DomResult<()> {
  let Some(element) =
    root.query_selector(selector)?
  else {
    return Ok(());
  };
  if let Some(input) =
    element.dyn_ref::<HtmlInputElement>()
  {
    input.set_value(value);
  } else if let Some(area) =
    element.dyn_ref::<HtmlTextAreaElement>()
  {
    area.set_value(value);
  }
  Ok(())
}

fn log_dom_failure(
  operation: &str,
  result: DomResult<()>
) {
  if let Err(err) = result {
    warn!(operation, error = ?err, "DOM update failed");
  }
}

impl View for DomView {
  fn initial_render(
    &self,
    tasks: &[TaskDto]
  ) {
    for task in tasks {
      log_dom_failure(
        "initial_render",
        self.insert_card(task)
      );
    }
  }

  fn append_task(&self, task: &TaskDto) {
    log_dom_failure(
      "append_task",
      self.insert_card(task)
    );
  }

  fn clear_all_tasks(&self) {
    for id in [IN_PROGRESS_LIST_ID, DONE_LIST_ID] {
      if let Some(list) = self.by_id(id) {
        list.set_text_content(None);
      }
    }
  }

  fn move_card(
    &self,
    id: Uuid,
    category: Category
  ) {
    let (Some(card), Some(list)) =
      (self.card(id), self.list_for(category))
    else {
      debug!(task = %id, "card or list missing; nothing to move");
      return;
    };
    log_dom_failure(
      "move_card",
      list.append_child(&card).map(|_| ())
    );
    if let Some(check) =
      card.query_selector(".check-btn").ok().flatten()
      && let Some(input) =
        check.dyn_ref::<HtmlInputElement>()
    {
      input.set_checked(category.is_done());
    }
  }

  fn remove_card(&self, id: Uuid) {
    if let Some(card) = self.card(id) {
      card.remove();
    }
  }

  fn show_card_mode(
    &self,
    id: Uuid,
    mode: CardMode
  ) {
    if let Some(card) = self.card(id) {
      log_dom_failure(
        "show_card_mode",
        self.set_mode(&card, mode)
      );
    }
  }

  fn update_card_text(
    &self,
    id: Uuid,
    fields: &EditFields
  ) {
    if let Some(card) = self.card(id) {
      log_dom_failure(
        "update_card_text",
        Self::write_card_text(&card, fields)
      );
    }
  }

  fn read_edit_fields(
    &self,
    id: Uuid
  ) -> Option<EditFields> {
    let card = self.card(id)?;
    Some(EditFields {
      title:       field_value(
        &card,
        ".edit-title"
      )?,
      duedate:     field_value(
        &card,
        ".edit-date"
      )?,
      description: field_value(
        &card,
        ".edit-desc"
      )?
    })
  }

  fn is_input_form_open(&self) -> bool {
    self.input_form().is_some()
  }

  fn scratch_input(&self) -> String {
    self
      .by_id(SCRATCH_INPUT_ID)
      .and_then(|el| {
        el.dyn_ref::<HtmlInputElement>()
          .map(HtmlInputElement::value)
      })
      .unwrap_or_default()
  }

  fn open_input_form(
    &self,
    prefill: &str
  ) {
    let Some(slot) = self.by_id(FORM_SLOT_ID)
    else {
      warn!("input form slot missing");
      return;
    };
    let result = self
      .build_input_form(prefill)
      .and_then(|form| {
        slot.append_child(&form).map(|_| ())
      });
    log_dom_failure("open_input_form", result);
  }

  fn read_input_form(
    &self
  ) -> DraftFields {
    let Some(form) = self.input_form() else {
      return DraftFields::default();
    };
    DraftFields {
      title:       field_value(&form, ".title")
        .unwrap_or_default(),
      duedate:     field_value(
        &form, ".duedate"
      )
      .unwrap_or_default(),
      description: field_value(&form, ".desc")
        .unwrap_or_default()
    }
  }

  fn close_input_form(&self) {
    if let Some(form) = self.input_form() {
      form.remove();
    }
    if let Some(input) = self
      .by_id(SCRATCH_INPUT_ID)
      .and_then(|el| {
        el.dyn_into::<HtmlInputElement>().ok()
      })
    {
      input.set_value("");
    }
  }

  fn apply_theme(&self, theme: Theme) {
    if let Some(body) = self.document.body() {
      log_dom_failure(
        "apply_theme",
        body
          .class_list()
          .toggle_with_force(
            DARK_THEME_CLASS,
            theme.is_dark()
          )
          .map(|_| ())
      );
    }
  }

  fn update_theme_icon(
    &self,
    theme: Theme
  ) {
    if let Some(icon) = self.by_id(THEME_ICON_ID)
    {
      icon.set_text_content(Some(theme.icon()));
    }
  }

  fn confirm(&self, message: &str) -> bool {
    gloo::dialogs::confirm(message)
  }

  fn alert(&self, message: &str) {
    gloo::dialogs::alert(message);
  }

  fn show_error(&self, message: &str) {
    let Some(banner) =
      self.by_id(ERROR_BANNER_ID)
    else {
      warn!(message, "error banner missing");
      return;
    };
    banner.set_text_content(Some(message));
    log_dom_failure(
      "show_error",
      banner.remove_attribute("hidden")
    );
  }
}
