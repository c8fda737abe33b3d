//! Ordering invariants of the task store over generated task lists.

use proptest::prelude::*;
use taskboard_core::store::TaskStore;
use taskboard_core::task::{Priority, Task, TaskId};

fn arb_priority() -> impl Strategy<Value = Priority> {
    prop::sample::select(Priority::ALL.to_vec())
}

/// Tasks with ids `0..n` in generation order, so the id doubles as the input position.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((arb_priority(), any::<bool>()), 0..40).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(idx, (priority, completed))| {
                let id = TaskId::new(idx.to_string()).expect("id");
                let mut task = Task::new(id, &format!("task {idx}"), priority).expect("task");
                task.completed = completed;
                task
            })
            .collect()
    })
}

fn position(task: &Task) -> usize {
    task.id.as_str().parse().expect("numeric id")
}

fn assert_sorted(tasks: &[Task]) -> Result<(), TestCaseError> {
    for pair in tasks.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        prop_assert!(!a.completed || b.completed, "completed task before an open one");
        if a.completed == b.completed {
            prop_assert!(a.priority.rank() <= b.priority.rank());
        }
    }
    Ok(())
}

proptest! {
    /// Incomplete first, then by rank; equal keys keep their input order.
    #[test]
    fn import_sorts_stably(tasks in arb_tasks()) {
        let store = TaskStore::import(tasks.clone());
        prop_assert_eq!(store.len(), tasks.len());
        assert_sorted(store.tasks())?;

        for pair in store.tasks().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.completed == b.completed && a.priority == b.priority {
                prop_assert!(position(a) < position(b));
            }
        }
    }

    /// A manual order is kept until the next toggle, which restores the policy.
    #[test]
    fn toggle_after_reorder_resorts(tasks in arb_tasks(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!tasks.is_empty());
        let mut store = TaskStore::import(tasks);

        let mut reversed = store.ids();
        reversed.reverse();
        store.reorder(&reversed);
        prop_assert_eq!(store.ids(), reversed.clone());

        let target = pick.get(&reversed).clone();
        let before = store.get(&target).expect("present").completed;
        prop_assert_eq!(store.toggle_completion(&target), Some(!before));
        prop_assert_eq!(store.len(), reversed.len());
        assert_sorted(store.tasks())?;
    }
}
