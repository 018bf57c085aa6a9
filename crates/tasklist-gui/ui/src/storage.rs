use tasklist_core::{
  PreferenceError,
  PreferenceStore
};

/// [`PreferenceStore`] backed by `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPreferences;

fn local_storage() -> Option<web_sys::Storage> {
  web_sys::window().and_then(|window| {
    window
      .local_storage()
      .ok()
      .flatten()
  })
}

impl PreferenceStore for LocalPreferences {
  fn get(&self, key: &str) -> Option<String> {
    local_storage().and_then(|storage| {
      storage.get_item(key).ok().flatten()
    })
  }

  fn set(
    &self,
    key: &str,
    value: &str
  ) -> Result<(), PreferenceError> {
    let storage = local_storage()
      .ok_or(PreferenceError::Unavailable)?;
    storage.set_item(key, value).map_err(
      |err| PreferenceError::Write {
        key:    key.to_string(),
        reason: format!("{err:?}")
      }
    )
  }
}
