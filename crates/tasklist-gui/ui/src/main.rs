mod api;
mod dom;
mod events;
mod format;
mod gateway;
mod storage;

use std::rc::Rc;

use tasklist_core::{
  Dispatcher,
  Settings,
  bootstrap_theme
};

use crate::dom::DomView;
use crate::gateway::{
  TauriGateway,
  report_ui_event
};
use crate::storage::LocalPreferences;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting tasklist frontend"
  );

  let settings = Settings::load_embedded(
    include_str!("../assets/tasklist.toml")
  );

  let document = web_sys::window()
    .and_then(|window| {
      window.document()
    })
    .expect("missing document");

  let view = DomView::new(document);
  let prefs = LocalPreferences;
  let theme =
    bootstrap_theme(&prefs, &view, &settings);

  let dispatcher = Rc::new(Dispatcher::new(
    TauriGateway,
    view,
    prefs,
    settings,
    theme
  ));

  events::on_dom_ready(move || {
    events::install(&dispatcher);
    wasm_bindgen_futures::spawn_local(
      async move {
        if let Err(err) =
          dispatcher.boot().await
        {
          report_ui_event(
            "initial_load_failed",
            &err.to_string()
          )
          .await;
        }
      }
    );
  });
}
