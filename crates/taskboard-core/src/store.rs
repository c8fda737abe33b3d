use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, trace, warn};

use crate::task::{IdSource, Lifecycle, Priority, Task, TaskId, ValidationError};

/// Ordered, in-memory task list. Its order is the on-screen order.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: IdSource,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-time load of the initial records, e.g. from server-rendered markup.
    ///
    /// Later duplicates of an id are dropped. The priority sort is applied once at the end.
    #[tracing::instrument(skip(records))]
    pub fn import<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Task>,
    {
        let mut store = Self::new();
        let mut seen = HashSet::new();

        for mut task in records {
            if !seen.insert(task.id.clone()) {
                warn!(id = %task.id, "duplicate task id in import; skipping");
                continue;
            }
            task.lifecycle = Lifecycle::Active;
            store.ids.observe(&task.id);
            store.tasks.push(task);
        }

        store.sort_by_priority();
        info!(count = store.tasks.len(), "imported tasks");
        store
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|task| task.id.clone()).collect()
    }

    /// True when nothing is left to show, ignoring records on their way out.
    pub fn is_view_empty(&self) -> bool {
        !self.tasks.iter().any(Task::is_active)
    }

    #[tracing::instrument(skip(self, now))]
    pub fn add_task(
        &mut self,
        title: &str,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<TaskId, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let id = self.ids.next(now);
        let task = Task::new(id.clone(), title, priority)?;
        debug!(id = %id, "adding task");
        self.tasks.push(task);
        self.sort_by_priority();
        Ok(id)
    }

    /// Parses raw form input before adding; the priority must be one of high/medium/low.
    pub fn add_from_input(
        &mut self,
        title: &str,
        priority: &str,
        now: DateTime<Utc>,
    ) -> Result<TaskId, ValidationError> {
        let priority: Priority = priority.parse()?;
        self.add_task(title, priority, now)
    }

    /// Returns the new completion state, or `None` when the id is unknown.
    #[tracing::instrument(skip(self))]
    pub fn toggle_completion(&mut self, id: &TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| &task.id == id)?;
        task.completed = !task.completed;
        let completed = task.completed;
        debug!(completed, "toggled task");
        self.sort_by_priority();
        Some(completed)
    }

    #[tracing::instrument(skip(self))]
    pub fn delete_task(&mut self, id: &TaskId) -> Option<Task> {
        let idx = self.position(id)?;
        debug!(idx, "deleting task");
        Some(self.tasks.remove(idx))
    }

    /// Marks an active record as leaving. Returns `false` for unknown ids and for
    /// records whose removal is already pending.
    pub fn begin_removal(&mut self, id: &TaskId) -> bool {
        match self.tasks.iter_mut().find(|task| &task.id == id) {
            Some(task) if task.is_active() => {
                task.lifecycle = Lifecycle::Removing;
                trace!(id = %id, "removal started");
                true
            }
            Some(_) => {
                debug!(id = %id, "removal already pending");
                false
            }
            None => false,
        }
    }

    /// Finishes a removal started with [`TaskStore::begin_removal`]. The record may
    /// have vanished in the meantime, in which case nothing happens.
    pub fn complete_removal(&mut self, id: &TaskId) -> Option<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|task| &task.id == id && task.lifecycle == Lifecycle::Removing)?;
        Some(self.tasks.remove(idx))
    }

    /// Stable: incomplete before completed, then by priority rank.
    pub fn sort_by_priority(&mut self) {
        self.tasks
            .sort_by_key(|task| (task.completed, task.priority.rank()));
    }

    /// Commits a visual order. Unknown and repeated ids are ignored; records the
    /// order does not mention keep their relative order after the listed ones.
    #[tracing::instrument(skip(self, order), fields(len = order.len()))]
    pub fn reorder(&mut self, order: &[TaskId]) {
        let mut remaining: Vec<Option<Task>> = self.tasks.drain(..).map(Some).collect();
        let mut next = Vec::with_capacity(remaining.len());

        for id in order {
            let slot = remaining
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|task| &task.id == id));
            match slot.and_then(|slot| slot.take()) {
                Some(task) => next.push(task),
                None => trace!(id = %id, "ignoring id in reorder"),
            }
        }

        let leftover: Vec<Task> = remaining.into_iter().flatten().collect();
        if !leftover.is_empty() {
            warn!(
                leftover = leftover.len(),
                "reorder did not list every task; appending the rest"
            );
        }
        next.extend(leftover);
        self.tasks = next;
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).single().expect("valid timestamp")
    }

    fn task(id: &str, title: &str, priority: Priority, completed: bool) -> Task {
        let mut task = Task::new(TaskId::new(id).expect("id"), title, priority).expect("task");
        task.completed = completed;
        task
    }

    fn titles(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|task| task.title.as_str()).collect()
    }

    fn id(raw: &str) -> TaskId {
        TaskId::new(raw).expect("id")
    }

    #[test]
    fn sort_puts_incomplete_first_then_rank_and_is_stable() {
        let store = TaskStore::import(vec![
            task("1", "low-a", Priority::Low, false),
            task("2", "done-high", Priority::High, true),
            task("3", "med-a", Priority::Medium, false),
            task("4", "high-a", Priority::High, false),
            task("5", "low-b", Priority::Low, false),
            task("6", "done-low", Priority::Low, true),
            task("7", "high-b", Priority::High, false),
            task("8", "done-high-2", Priority::High, true),
        ]);

        assert_eq!(
            titles(&store),
            vec![
                "high-a",
                "high-b",
                "med-a",
                "low-a",
                "low-b",
                "done-high",
                "done-high-2",
                "done-low",
            ]
        );

        let tasks = store.tasks();
        let first_done = tasks.iter().position(|t| t.completed).expect("a completed task");
        assert!(tasks[..first_done].iter().all(|t| !t.completed));
        assert!(tasks[first_done..].iter().all(|t| t.completed));
        for pair in tasks.windows(2) {
            if pair[0].completed == pair[1].completed {
                assert!(pair[0].priority.rank() <= pair[1].priority.rank());
            }
        }
    }

    #[test]
    fn add_assigns_unique_ids_and_sorts() {
        let mut store = TaskStore::new();
        let low = store.add_task("sweep", Priority::Low, now()).expect("add");
        let high = store.add_task("taxes", Priority::High, now()).expect("add");
        assert_ne!(low, high);
        assert_eq!(titles(&store), vec!["taxes", "sweep"]);
        assert!(store.tasks().iter().all(|t| !t.completed));
    }

    #[test]
    fn add_rejects_bad_input() {
        let mut store = TaskStore::new();
        assert_eq!(
            store.add_task("  ", Priority::High, now()),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            store.add_from_input("x", "critical", now()),
            Err(ValidationError::UnknownPriority("critical".to_string()))
        );
        assert!(store.is_empty());

        let added = store.add_from_input("x", "Medium", now()).expect("add");
        assert_eq!(store.get(&added).map(|t| t.priority), Some(Priority::Medium));
    }

    #[test]
    fn add_then_delete_restores_prior_state() {
        let mut store = TaskStore::import(vec![
            task("1", "a", Priority::High, false),
            task("2", "b", Priority::Low, false),
            task("3", "c", Priority::Medium, true),
        ]);
        let before = store.ids();

        let added = store.add_task("temp", Priority::Medium, now()).expect("add");
        assert_eq!(store.len(), 4);
        let removed = store.delete_task(&added).expect("removed");
        assert_eq!(removed.title, "temp");

        assert_eq!(store.ids(), before);
        assert!(store.get(&added).is_none());
    }

    #[test]
    fn toggle_twice_restores_flag_and_order() {
        let mut store = TaskStore::import(vec![
            task("1", "a", Priority::High, false),
            task("2", "b", Priority::Medium, false),
            task("3", "c", Priority::Low, false),
        ]);
        let before = store.ids();

        assert_eq!(store.toggle_completion(&id("1")), Some(true));
        assert_eq!(titles(&store), vec!["b", "c", "a"]);
        assert_eq!(store.toggle_completion(&id("1")), Some(false));

        assert_eq!(store.ids(), before);
        assert_eq!(store.get(&id("1")).map(|t| t.completed), Some(false));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = TaskStore::import(vec![task("1", "a", Priority::High, false)]);
        assert_eq!(store.toggle_completion(&id("nope")), None);
        assert!(store.delete_task(&id("nope")).is_none());
        assert!(!store.begin_removal(&id("nope")));
        assert!(store.complete_removal(&id("nope")).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn double_removal_is_guarded() {
        let mut store = TaskStore::import(vec![
            task("1", "a", Priority::High, false),
            task("2", "b", Priority::High, false),
        ]);

        assert!(store.begin_removal(&id("1")));
        assert!(!store.begin_removal(&id("1")));
        assert_eq!(store.len(), 2);

        assert!(store.complete_removal(&id("1")).is_some());
        assert!(store.complete_removal(&id("1")).is_none());
        assert_eq!(titles(&store), vec!["b"]);
    }

    #[test]
    fn complete_removal_requires_pending_removal() {
        let mut store = TaskStore::import(vec![task("1", "a", Priority::High, false)]);
        assert!(store.complete_removal(&id("1")).is_none());
        assert_eq!(store.len(), 1);

        assert!(store.begin_removal(&id("1")));
        store.delete_task(&id("1"));
        assert!(store.complete_removal(&id("1")).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn view_emptiness_ignores_leaving_records() {
        let mut store = TaskStore::import(vec![task("1", "a", Priority::High, false)]);
        assert!(!store.is_view_empty());
        store.begin_removal(&id("1"));
        assert!(store.is_view_empty());
        assert!(!store.is_empty());
    }

    #[test]
    fn reorder_commits_visual_order_until_next_sort() {
        let mut store = TaskStore::import(vec![
            task("1", "a", Priority::High, false),
            task("2", "b", Priority::Medium, false),
            task("3", "c", Priority::Low, false),
        ]);

        store.reorder(&[id("3"), id("1"), id("2")]);
        assert_eq!(titles(&store), vec!["c", "a", "b"]);

        store.toggle_completion(&id("2"));
        assert_eq!(titles(&store), vec!["a", "c", "b"]);
    }

    #[test]
    fn reorder_never_drops_records() {
        let mut store = TaskStore::import(vec![
            task("1", "a", Priority::High, false),
            task("2", "b", Priority::High, false),
            task("3", "c", Priority::High, false),
        ]);

        store.reorder(&[id("3"), id("ghost"), id("3")]);
        assert_eq!(titles(&store), vec!["c", "a", "b"]);
    }

    #[test]
    fn import_skips_duplicates_and_reserves_ids() {
        let issued = format!("temp_{}", (now() + Duration::seconds(1)).timestamp_millis());
        let mut store = TaskStore::import(vec![
            task(&issued, "first", Priority::Low, false),
            task(&issued, "second", Priority::High, false),
        ]);
        assert_eq!(titles(&store), vec!["first"]);

        let fresh = store.add_task("new", Priority::Low, now()).expect("add");
        assert_ne!(fresh.as_str(), issued);
        assert_eq!(store.len(), 2);
    }
}
