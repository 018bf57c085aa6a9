//! Classification of raw UI events into dispatcher actions.
//!
//! The boundary layer describes what was clicked as a [`ClickTarget`];
//! [`classify`] turns that into a [`Resolved`] decision without touching
//! the DOM. Dispatch keys are the `data-action` tags the renderer puts on
//! every control, never styling class names.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Tag carried by a control in its `data-action` attribute.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ActionKind {
  ThemeToggle,
  ClearAll,
  Add,
  Check,
  Delete,
  Edit,
  View,
  HideView,
  CancelEdit,
  Save
}

impl ActionKind {
  pub const ALL: [ActionKind; 10] = [
    ActionKind::ThemeToggle,
    ActionKind::ClearAll,
    ActionKind::Add,
    ActionKind::Check,
    ActionKind::Delete,
    ActionKind::Edit,
    ActionKind::View,
    ActionKind::HideView,
    ActionKind::CancelEdit,
    ActionKind::Save
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | Self::ThemeToggle => {
        "theme-toggle"
      }
      | Self::ClearAll => "clear-all",
      | Self::Add => "add",
      | Self::Check => "check",
      | Self::Delete => "delete",
      | Self::Edit => "edit",
      | Self::View => "view",
      | Self::HideView => "hide-view",
      | Self::CancelEdit => {
        "cancel-edit"
      }
      | Self::Save => "save"
    }
  }
}

impl fmt::Display for ActionKind {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct UnknownActionKind(
  pub String
);

impl fmt::Display for UnknownActionKind {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "unknown action tag: {}",
      self.0
    )
  }
}

impl std::error::Error
  for UnknownActionKind
{
}

impl FromStr for ActionKind {
  type Err = UnknownActionKind;

  fn from_str(
    raw: &str
  ) -> Result<Self, Self::Err> {
    let tag = raw.trim();
    Self::ALL
      .into_iter()
      .find(|kind| kind.as_str() == tag)
      .ok_or_else(|| {
        UnknownActionKind(
          tag.to_string()
        )
      })
  }
}

/// What the boundary layer saw when a click arrived.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct ClickTarget {
  /// The element is a `<button>`.
  pub is_button:           bool,
  /// The element has `type="submit"`.
  pub is_submit:           bool,
  /// The element's own `data-action` tag.
  pub action:              Option<ActionKind>,
  /// The element is, or sits inside, the theme toggle button.
  pub inside_theme_toggle: bool,
  /// `data-id` of the nearest enclosing task card.
  pub card_id:             Option<Uuid>,
  /// Checked state when the element is a checkbox.
  pub checked:             bool
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum UiEvent {
  Submit,
  Click(ClickTarget)
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CardAction {
  /// Checkbox toggled; `true` moves the card to "Done".
  SetDone(bool),
  Delete,
  Edit,
  View,
  /// Leaves the expanded view or cancels an edit.
  Close,
  Save
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Action {
  ToggleTheme,
  ClearAll,
  Add,
  Card {
    id:     Uuid,
    action: CardAction
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
  Default,
)]
pub struct Resolved {
  pub prevent_default: bool,
  pub action:          Option<Action>
}

pub fn classify(
  event: &UiEvent
) -> Resolved {
  let target = match event {
    | UiEvent::Submit => {
      return Resolved {
        prevent_default: true,
        action:          None
      };
    }
    | UiEvent::Click(target) => target
  };

  Resolved {
    prevent_default: target.is_button
      || target.is_submit,
    action:          classify_click(
      target
    )
  }
}

fn classify_click(
  target: &ClickTarget
) -> Option<Action> {
  if target.inside_theme_toggle
    || target.action
      == Some(ActionKind::ThemeToggle)
  {
    return Some(Action::ToggleTheme);
  }

  match target.action {
    | Some(ActionKind::ClearAll) => {
      return Some(Action::ClearAll);
    }
    | Some(ActionKind::Add) => {
      return Some(Action::Add);
    }
    | _ => {}
  }

  let id = target.card_id?;
  let action = match target.action? {
    | ActionKind::Check => {
      CardAction::SetDone(
        target.checked
      )
    }
    | ActionKind::Delete => {
      CardAction::Delete
    }
    | ActionKind::Edit => {
      CardAction::Edit
    }
    | ActionKind::View => {
      CardAction::View
    }
    | ActionKind::HideView
    | ActionKind::CancelEdit => {
      CardAction::Close
    }
    | ActionKind::Save => {
      CardAction::Save
    }
    | ActionKind::ThemeToggle
    | ActionKind::ClearAll
    | ActionKind::Add => return None
  };

  Some(Action::Card { id, action })
}
