use tracing::{
  error,
  info
};

use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;
use crate::gateway::Gateway;
use crate::settings::Settings;
use crate::theme::{
  PreferenceStore,
  Theme
};
use crate::view::View;

/// Reads the stored theme and applies the dark class right away, before
/// the task list exists, so the page never flashes the wrong theme.
pub fn bootstrap_theme<P, V>(
  prefs: &P,
  view: &V,
  settings: &Settings
) -> Theme
where
  P: PreferenceStore,
  V: View
{
  let stored = prefs
    .get(&settings.theme.storage_key);
  let theme = Theme::from_storage(
    stored.as_deref()
  );
  if theme.is_dark() {
    view.apply_theme(theme);
  }
  info!(
    theme = theme.storage_value(),
    "theme bootstrapped"
  );
  theme
}

impl<G, V, P> Dispatcher<G, V, P>
where
  G: Gateway,
  V: View,
  P: PreferenceStore
{
  /// One-time load once the page is ready: sync the theme icon, fetch
  /// every task, render them. Returns the number of tasks rendered.
  pub async fn start(
    &self
  ) -> Result<usize, DispatchError> {
    self
      .view
      .update_theme_icon(self.theme.get());

    let tasks = self
      .gateway
      .list_tasks(None)
      .await
      .map_err(DispatchError::gateway(
        "load tasks"
      ))?;

    self.view.initial_render(&tasks);
    info!(
      count = tasks.len(),
      "initial render complete"
    );
    Ok(tasks.len())
  }

  /// [`Self::start`] with failures logged and shown inline. The list
  /// stays empty and nothing is retried.
  pub async fn boot(
    &self
  ) -> Result<usize, DispatchError> {
    let result = self.start().await;
    if let Err(err) = result.as_ref() {
      error!(error = %err, "initial task load failed");
      self.view.show_error(&err.to_string());
    }
    result
  }
}
