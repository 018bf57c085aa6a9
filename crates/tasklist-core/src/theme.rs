use std::rc::Rc;

use thiserror::Error;

pub const DARK_THEME_CLASS: &str =
  "dark-theme";

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
)]
pub enum Theme {
  #[default]
  Light,
  Dark
}

impl Theme {
  pub fn toggled(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }

  pub fn is_dark(self) -> bool {
    self == Self::Dark
  }

  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark"
    }
  }

  /// Anything other than an exact `"dark"` reads as light.
  pub fn from_storage(
    stored: Option<&str>
  ) -> Self {
    match stored {
      | Some("dark") => Self::Dark,
      | _ => Self::Light
    }
  }

  /// Glyph shown on the toggle button: the theme it switches to.
  pub fn icon(self) -> &'static str {
    match self {
      | Self::Light => "\u{1F319}",
      | Self::Dark => "\u{2600}\u{FE0F}"
    }
  }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreferenceError {
  #[error("preference storage unavailable")]
  Unavailable,

  #[error("failed to write preference {key}: {reason}")]
  Write { key: String, reason: String }
}

/// Durable string key-value storage that survives reloads.
pub trait PreferenceStore {
  fn get(&self, key: &str) -> Option<String>;

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), PreferenceError>;
}

impl<P: PreferenceStore> PreferenceStore
  for Rc<P>
{
  fn get(&self, key: &str) -> Option<String> {
    self.as_ref().get(key)
  }

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), PreferenceError> {
    self.as_ref().set(key, value)
  }
}
