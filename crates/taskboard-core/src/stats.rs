use serde::Serialize;

use crate::store::TaskStore;
use crate::task::Priority;

pub const NO_TASKS: &str = "No tasks yet";

/// Dashboard figures derived from the store. Recomputed after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub completion_rate: u8,
    pub high_priority_count: usize,
    pub latest_task: Option<String>,
}

impl Stats {
    pub fn project(store: &TaskStore) -> Self {
        let tasks = store.tasks();
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let high_priority_count = tasks
            .iter()
            .filter(|task| task.priority == Priority::High)
            .count();

        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate: completion_rate(completed, total),
            high_priority_count,
            latest_task: tasks.last().map(|task| task.title.clone()),
        }
    }

    pub fn latest_label(&self) -> &str {
        self.latest_task.as_deref().unwrap_or(NO_TASKS)
    }

    pub fn completion_label(&self) -> String {
        format!("{}% of tasks completed", self.completion_rate)
    }

    pub fn progress_label(&self) -> String {
        format!("{}% Complete", self.completion_rate)
    }

    pub fn high_priority_label(&self) -> String {
        format!("{} tasks", self.high_priority_count)
    }
}

/// Rounded percentage, half away from zero; 0 for an empty list.
pub fn completion_rate(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rate = (completed as f64 / total as f64 * 100.0).round();
    rate.clamp(0.0, 100.0) as u8
}
