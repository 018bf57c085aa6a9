mod commands;
mod state;

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::{
  error,
  info,
  warn
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
  EnvFilter,
  fmt
};

fn init_tracing(
  log_dir: &Path
) -> Option<WorkerGuard> {
  let filter =
    EnvFilter::try_from_default_env()
      .or_else(|_| {
        EnvFilter::try_new(
          "info,tasklist_gui_tauri=debug,\
           tasklist_store=debug"
        )
      })
      .unwrap_or_else(|_| {
        EnvFilter::new("info")
      });

  let (file_layer, guard) =
    match fs::create_dir_all(log_dir) {
      | Ok(()) => {
        let appender =
          tracing_appender::rolling::daily(
            log_dir,
            "tasklist.log"
          );
        let (writer, guard) =
          tracing_appender::non_blocking(
            appender
          );
        (
          Some(
            fmt::layer()
              .with_ansi(false)
              .with_writer(writer)
          ),
          Some(guard)
        )
      }
      | Err(err) => {
        eprintln!(
          "failed to create log \
           directory {}: {err}",
          log_dir.display()
        );
        (None, None)
      }
    };

  let _ =
    tracing_subscriber::registry()
      .with(filter)
      .with(
        fmt::layer()
          .with_target(true)
          .with_line_number(true)
      )
      .with(file_layer)
      .try_init();

  guard
}

fn main() {
  let data_dir =
    state::resolve_gui_data_dir();
  let _log_guard =
    init_tracing(&data_dir.join("logs"));

  info!(
    data_dir = %data_dir.display(),
    "starting tasklist GUI backend"
  );

  let state =
    match state::AppState::open(&data_dir)
      .context(
        "failed to initialize app \
         state"
      ) {
      | Ok(state) => state,
      | Err(err) => {
        error!(
          error = %format!("{err:#}"),
          "initialization failed"
        );
        std::process::exit(1);
      }
    };

  tauri::Builder::default()
    .setup(|app| {
      install_signal_handlers(
        app.handle().clone()
      );
      Ok(())
    })
    .manage(state)
    .invoke_handler(
      tauri::generate_handler![
        commands::tasks::tasks_list,
        commands::tasks::task_add,
        commands::tasks::task_update,
        commands::tasks::task_delete,
        commands::tasks::ui_log,
      ]
    )
    .run(tauri::generate_context!())
    .expect(
      "error while running tasklist \
       GUI backend"
    );
}

fn install_signal_handlers(
  app_handle: tauri::AppHandle
) {
  tauri::async_runtime::spawn(
    async move {
      wait_for_shutdown_signal().await;
      warn!(
        "received shutdown signal; \
         exiting application"
      );
      app_handle.exit(0);
    }
  );
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
  use tokio::signal::unix::{
    SignalKind,
    signal
  };

  let mut sigint = match signal(
    SignalKind::interrupt()
  ) {
    | Ok(stream) => stream,
    | Err(error) => {
      error!(
        %error,
        "failed to register SIGINT \
         handler; falling back to \
         ctrl_c"
      );
      let _ =
        tokio::signal::ctrl_c().await;
      return;
    }
  };

  let mut sigterm = match signal(
    SignalKind::terminate()
  ) {
    | Ok(stream) => stream,
    | Err(error) => {
      error!(
        %error,
        "failed to register SIGTERM \
         handler; falling back to \
         ctrl_c"
      );
      let _ =
        tokio::signal::ctrl_c().await;
      return;
    }
  };

  tokio::select! {
    _ = sigint.recv() => {}
    _ = sigterm.recv() => {}
  }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
  if let Err(error) =
    tokio::signal::ctrl_c().await
  {
    error!(
      %error,
      "failed waiting for ctrl_c \
       signal"
    );
  }
}
