use std::path::{Path, PathBuf};

use anyhow::Context;
use parking_lot::Mutex;
use tasklist_shared::{TaskCreate, TaskDto, TaskUpdateArgs, TasksListArgs};
use tasklist_store::DataStore;
use tracing::instrument;
use uuid::Uuid;

pub struct AppState {
    store: Mutex<DataStore>,
}

impl AppState {
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let store = DataStore::open(data_dir)
            .with_context(|| format!("failed to open GUI datastore at {}", data_dir.display()))?;
        Ok(Self {
            store: Mutex::new(store),
        })
    }

    #[instrument(skip(self))]
    pub fn list(&self, args: TasksListArgs) -> anyhow::Result<Vec<TaskDto>> {
        self.store.lock().list(args.query.as_deref())
    }

    #[instrument(skip(self))]
    pub fn add(&self, create: TaskCreate) -> anyhow::Result<TaskDto> {
        self.store.lock().create(create)
    }

    #[instrument(skip(self))]
    pub fn update(&self, update: TaskUpdateArgs) -> anyhow::Result<TaskDto> {
        self.store.lock().update(update.id, update.patch)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.store.lock().delete(id)
    }
}

pub fn resolve_gui_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("TASKLIST_GUI_DATA") {
        return PathBuf::from(path);
    }

    if let Ok(cwd) = std::env::current_dir() {
        return cwd.join(".tasklist_gui_data");
    }

    PathBuf::from(".tasklist_gui_data")
}
