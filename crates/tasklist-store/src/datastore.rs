use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use chrono::Utc;
use tasklist_shared::{TaskCreate, TaskDto, TaskPatch};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use uuid::Uuid;

use crate::record::TaskRecord;

#[derive(Debug)]
pub struct DataStore {
    pub tasks_path: PathBuf,
}

impl DataStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let tasks_path = data_dir.join("tasks.data");
        if !tasks_path.exists() {
            fs::write(&tasks_path, "")?;
        }

        info!(
            data_dir = %data_dir.display(),
            tasks = %tasks_path.display(),
            "opened datastore"
        );

        Ok(Self { tasks_path })
    }

    #[tracing::instrument(skip(self))]
    pub fn load_tasks(&self) -> anyhow::Result<Vec<TaskRecord>> {
        load_jsonl(&self.tasks_path).context("failed to load tasks.data")
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn save_tasks(&self, tasks: &[TaskRecord]) -> anyhow::Result<()> {
        save_jsonl_atomic(&self.tasks_path, tasks).context("failed to save tasks.data")
    }

    /// Every task in creation order, optionally narrowed to those whose
    /// title or description contains `query` (ASCII case-insensitive).
    #[tracing::instrument(skip(self))]
    pub fn list(&self, query: Option<&str>) -> anyhow::Result<Vec<TaskDto>> {
        let mut tasks = self.load_tasks()?;
        tasks.sort_by_key(|task| task.created);

        let needle = query
            .map(|q| q.trim().to_ascii_lowercase())
            .filter(|q| !q.is_empty());

        let listed = tasks
            .into_iter()
            .filter(|task| match needle.as_deref() {
                Some(q) => {
                    task.title.to_ascii_lowercase().contains(q)
                        || task.description.to_ascii_lowercase().contains(q)
                }
                None => true,
            })
            .map(TaskRecord::into_dto)
            .collect::<Vec<_>>();

        debug!(count = listed.len(), "listed tasks");
        Ok(listed)
    }

    #[tracing::instrument(skip(self, create), fields(title_len = create.title.len()))]
    pub fn create(&self, create: TaskCreate) -> anyhow::Result<TaskDto> {
        if create.title.is_empty() {
            return Err(anyhow!("title is required"));
        }

        let now = Utc::now();
        let mut tasks = self.load_tasks()?;
        let record = TaskRecord {
            id: Uuid::new_v4(),
            title: create.title,
            duedate: normalize_duedate(create.duedate),
            description: create.description,
            category: create.category,
            created: now,
            modified: now,
        };

        tasks.push(record.clone());
        self.save_tasks(&tasks)?;

        info!(id = %record.id, "created task");
        Ok(record.into_dto())
    }

    #[tracing::instrument(skip(self, patch), fields(id = %id))]
    pub fn update(&self, id: Uuid, patch: TaskPatch) -> anyhow::Result<TaskDto> {
        let mut tasks = self.load_tasks()?;

        let updated = {
            let task = tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| anyhow!("task not found: {id}"))?;

            apply_patch(task, patch);
            task.modified = Utc::now();
            task.clone()
        };

        self.save_tasks(&tasks)?;
        debug!(id = %id, category = %updated.category, "updated task");
        Ok(updated.into_dto())
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        let mut tasks = self.load_tasks()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(anyhow!("task not found: {id}"));
        }

        self.save_tasks(&tasks)?;
        info!(id = %id, remaining = tasks.len(), "deleted task");
        Ok(())
    }
}

/// Present fields replace the stored ones as sent. Only creation
/// requires a title.
fn apply_patch(task: &mut TaskRecord, patch: TaskPatch) {
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(duedate) = patch.duedate {
        task.duedate = normalize_duedate(Some(duedate));
    }
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(category) = patch.category {
        task.category = category;
    }
}

fn normalize_duedate(duedate: Option<String>) -> Option<String> {
    duedate
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[tracing::instrument(skip(path))]
fn load_jsonl(path: &Path) -> anyhow::Result<Vec<TaskRecord>> {
    debug!(file = %path.display(), "loading jsonl");
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let task: TaskRecord = serde_json::from_str(trimmed)
            .with_context(|| format!("failed parsing {} line {}", path.display(), idx + 1))?;
        out.push(task);
    }

    debug!(count = out.len(), "loaded tasks from jsonl");
    Ok(out)
}

#[tracing::instrument(skip(path, tasks))]
fn save_jsonl_atomic(path: &Path, tasks: &[TaskRecord]) -> anyhow::Result<()> {
    debug!(file = %path.display(), count = tasks.len(), "saving jsonl atomically");

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    for task in tasks {
        let serialized = serde_json::to_string(task)?;
        writeln!(temp, "{serialized}")?;
    }
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}
