use std::fs;
use std::path::Path;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::store::TaskStore;
use crate::task::{Task, TaskId, ValidationError};

/// A task record as found in seed markup or a snapshot file, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub id: String,
    pub title: String,
    pub priority: String,
    #[serde(default)]
    pub completed: bool,
}

impl TaskSnapshot {
    pub fn into_task(self) -> Result<Task, ValidationError> {
        let id = TaskId::new(self.id)?;
        let priority = self.priority.parse()?;
        let mut task = Task::new(id, &self.title, priority)?;
        task.completed = self.completed;
        Ok(task)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub index: usize,
    pub id: String,
    pub error: ValidationError,
}

/// Validates every snapshot, keeping the good ones in their original order.
pub fn validate(snapshots: Vec<TaskSnapshot>) -> (Vec<Task>, Vec<Rejected>) {
    let mut tasks = Vec::with_capacity(snapshots.len());
    let mut rejected = vec![];

    for (index, snapshot) in snapshots.into_iter().enumerate() {
        let id = snapshot.id.clone();
        match snapshot.into_task() {
            Ok(task) => tasks.push(task),
            Err(error) => {
                warn!(index, id = %id, %error, "rejecting task snapshot");
                rejected.push(Rejected { index, id, error });
            }
        }
    }

    (tasks, rejected)
}

/// Reads a JSON array of task records. Any invalid record fails the whole load.
#[tracing::instrument]
pub fn load_file(path: &Path) -> anyhow::Result<TaskStore> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshots: Vec<TaskSnapshot> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))?;

    let (tasks, rejected) = validate(snapshots);
    if let Some(first) = rejected.first() {
        return Err(anyhow!(
            "invalid task #{} (id `{}`) in {}: {}",
            first.index + 1,
            first.id,
            path.display(),
            first.error
        ));
    }

    info!(path = %path.display(), count = tasks.len(), "loaded snapshot");
    Ok(TaskStore::import(tasks))
}
