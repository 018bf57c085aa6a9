use serde::Deserialize;
use tracing::{
  error,
  info
};

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
  Deserialize,
)]
#[serde(default)]
pub struct Settings {
  pub theme:   ThemeSettings,
  pub prompts: PromptSettings,
  pub gateway: GatewaySettings
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
#[serde(default)]
pub struct ThemeSettings {
  /// Preference key the light/dark flag is stored under.
  pub storage_key: String
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
#[serde(default)]
pub struct PromptSettings {
  pub confirm_clear:  String,
  pub title_required: String
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
  Deserialize,
)]
#[serde(default)]
pub struct GatewaySettings {
  /// Filter passed to the task fetch that precedes a bulk clear.
  pub clear_filter: String
}

impl Default for ThemeSettings {
  fn default() -> Self {
    Self {
      storage_key: "theme".to_string()
    }
  }
}

impl Default for PromptSettings {
  fn default() -> Self {
    Self {
      confirm_clear:  "Delete ALL tasks?"
        .to_string(),
      title_required: "Title required"
        .to_string()
    }
  }
}

impl Settings {
  pub fn from_toml_str(
    raw: &str
  ) -> Result<Self, toml::de::Error> {
    toml::from_str::<Settings>(raw)
  }

  /// Parses bundled settings, falling back to defaults on error.
  pub fn load_embedded(
    raw: &str
  ) -> Self {
    match Self::from_toml_str(raw) {
      | Ok(settings) => {
        info!(
          theme_key = %settings.theme.storage_key,
          "loaded tasklist settings"
        );
        settings
      }
      | Err(err) => {
        error!(error = %err, "failed to parse tasklist settings; using defaults");
        Self::default()
      }
    }
  }

  pub fn clear_filter(
    &self
  ) -> Option<&str> {
    Some(
      self.gateway.clear_filter.as_str()
    )
  }
}

#[cfg(test)]
mod tests {
  use super::Settings;

  #[test]
  fn empty_document_yields_defaults() {
    let settings =
      Settings::from_toml_str("")
        .expect("parse empty");
    assert_eq!(settings, Settings::default());
    assert_eq!(
      settings.theme.storage_key,
      "theme"
    );
    assert_eq!(
      settings.prompts.confirm_clear,
      "Delete ALL tasks?"
    );
  }

  #[test]
  fn partial_tables_keep_remaining_defaults()
   {
    let settings = Settings::from_toml_str(
      r#"
[prompts]
title_required = "Give the task a title"
"#
    )
    .expect("parse");
    assert_eq!(
      settings.prompts.title_required,
      "Give the task a title"
    );
    assert_eq!(
      settings.prompts.confirm_clear,
      "Delete ALL tasks?"
    );
    assert_eq!(
      settings.clear_filter(),
      Some("")
    );
  }

  #[test]
  fn malformed_toml_falls_back() {
    let settings =
      Settings::load_embedded(
        "[theme\nstorage_key = 1"
      );
    assert_eq!(settings, Settings::default());
  }

  #[test]
  fn bundled_settings_parse() {
    let raw = include_str!(
      "../../tasklist-gui/ui/assets/tasklist.toml"
    );
    let settings =
      Settings::from_toml_str(raw)
        .expect("bundled settings");
    assert_eq!(
      settings.theme.storage_key,
      "theme"
    );
  }
}
