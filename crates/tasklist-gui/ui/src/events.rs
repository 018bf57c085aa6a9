use std::rc::Rc;

use gloo::events::EventListener;
use tasklist_core::{
  ActionKind,
  ClickTarget,
  Dispatcher,
  UiEvent,
  classify
};
use tracing::debug;
use uuid::Uuid;
use wasm_bindgen::JsCast;
use web_sys::{
  Element,
  Event,
  HtmlInputElement
};

use crate::dom::{
  CARD_CLASS,
  DomView
};
use crate::gateway::{
  TauriGateway,
  report_ui_event
};
use crate::storage::LocalPreferences;

pub type AppDispatcher = Dispatcher<
  TauriGateway,
  DomView,
  LocalPreferences
>;

/// Describes the clicked element the way `classify` expects it.
pub fn resolve_click(
  event: &Event
) -> Option<ClickTarget> {
  let target = event
    .target()?
    .dyn_into::<Element>()
    .ok()?;

  let action = target
    .get_attribute("data-action")
    .and_then(|tag| {
      match tag.parse::<ActionKind>() {
        | Ok(kind) => Some(kind),
        | Err(err) => {
          debug!(%err, "ignoring unknown action tag");
          None
        }
      }
    });

  let theme_selector = format!(
    "[data-action=\"{}\"]",
    ActionKind::ThemeToggle
  );
  let inside_theme_toggle = target
    .closest(&theme_selector)
    .ok()
    .flatten()
    .is_some();

  let card_id = target
    .closest(&format!(".{CARD_CLASS}"))
    .ok()
    .flatten()
    .and_then(|card| {
      card.get_attribute("data-id")
    })
    .and_then(|raw| {
      Uuid::parse_str(&raw).ok()
    });

  let checked = target
    .dyn_ref::<HtmlInputElement>()
    .is_some_and(HtmlInputElement::checked);

  Some(ClickTarget {
    is_button: target
      .tag_name()
      .eq_ignore_ascii_case("button"),
    is_submit: target
      .get_attribute("type")
      .is_some_and(|kind| {
        kind.eq_ignore_ascii_case("submit")
      }),
    action,
    inside_theme_toggle,
    card_id,
    checked
  })
}

/// Cancels every form submission and routes body clicks through the
/// dispatcher. Each action runs in its own local task.
pub fn install(
  dispatcher: &Rc<AppDispatcher>
) {
  let Some(window) = web_sys::window() else {
    return;
  };

  EventListener::new(
    &window,
    "submit",
    |event| {
      if classify(&UiEvent::Submit)
        .prevent_default
      {
        event.prevent_default();
      }
    }
  )
  .forget();

  let Some(body) = window
    .document()
    .and_then(|document| document.body())
  else {
    tracing::warn!(
      "document body missing; clicks \
       will not be handled"
    );
    return;
  };

  let dispatcher = Rc::clone(dispatcher);
  EventListener::new(
    &body,
    "click",
    move |event| {
      let Some(target) = resolve_click(event)
      else {
        return;
      };
      let resolved =
        classify(&UiEvent::Click(target));
      if resolved.prevent_default {
        event.prevent_default();
      }
      let Some(action) = resolved.action
      else {
        return;
      };

      let dispatcher =
        Rc::clone(&dispatcher);
      wasm_bindgen_futures::spawn_local(
        async move {
          if let Err(err) =
            dispatcher.handle(action).await
          {
            report_ui_event(
              "action_failed",
              &err.to_string()
            )
            .await;
          }
        }
      );
    }
  )
  .forget();
}

/// Runs `ready` once the document has finished parsing.
pub fn on_dom_ready(
  ready: impl FnOnce() + 'static
) {
  let Some(document) = web_sys::window()
    .and_then(|window| window.document())
  else {
    return;
  };

  if document.ready_state() == "loading" {
    EventListener::once(
      &document,
      "DOMContentLoaded",
      move |_| ready()
    )
    .forget();
  } else {
    ready();
  }
}
