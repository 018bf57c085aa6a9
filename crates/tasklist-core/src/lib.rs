pub mod action;
pub mod dispatcher;
pub mod error;
pub mod gateway;
pub mod settings;
pub mod startup;
pub mod theme;
pub mod view;

pub use action::{
  Action,
  ActionKind,
  CardAction,
  ClickTarget,
  Resolved,
  UiEvent,
  classify
};
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use gateway::{
  Gateway,
  GatewayError
};
pub use settings::Settings;
pub use startup::bootstrap_theme;
pub use theme::{
  PreferenceError,
  PreferenceStore,
  Theme
};
pub use view::{
  CardMode,
  DraftFields,
  EditFields,
  View
};
