//! Drag-and-drop re-sequencing of the task list.
//!
//! The engine only tracks one gesture at a time and knows nothing about the
//! document: the view reports row geometry on every drag-over and asks where
//! to draw the placeholder. On drop it hands back the final id sequence, which
//! the caller commits with [`TaskStore::reorder`](crate::store::TaskStore::reorder).

use tracing::{debug, trace};

use crate::task::TaskId;

/// Vertical extent of one rendered task row, in client coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBox {
    pub id: TaskId,
    pub top: f64,
    pub height: f64,
}

impl RowBox {
    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub height: f64,
    /// Row the placeholder sits in front of; `None` means the end of the list.
    pub before: Option<TaskId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        dragged: TaskId,
        placeholder: Placeholder,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DragReorder {
    state: DragState,
}

impl DragReorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn dragged(&self) -> Option<&TaskId> {
        match &self.state {
            DragState::Dragging { dragged, .. } => Some(dragged),
            DragState::Idle => None,
        }
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        match &self.state {
            DragState::Dragging { placeholder, .. } => Some(placeholder),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self, id: &TaskId) -> bool {
        self.dragged() == Some(id)
    }

    /// Starts a gesture; the placeholder takes the dragged row's slot. A gesture
    /// already in flight is replaced, so there is never more than one placeholder.
    pub fn begin(&mut self, dragged: TaskId, height: f64) {
        if let Some(previous) = self.dragged() {
            debug!(previous = %previous, "drag started twice; replacing gesture");
        }
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        debug!(id = %dragged, height, "drag start");
        self.state = DragState::Dragging {
            placeholder: Placeholder {
                height,
                before: Some(dragged.clone()),
            },
            dragged,
        };
    }

    /// Moves the placeholder in front of the nearest row below the pointer.
    pub fn hover(&mut self, pointer_y: f64, rows: &[RowBox]) -> Option<&Placeholder> {
        let DragState::Dragging { placeholder, .. } = &mut self.state else {
            return None;
        };
        let anchor = insert_before(pointer_y, rows).cloned();
        if placeholder.before != anchor {
            trace!(pointer_y, anchor = ?anchor, "placeholder moved");
            placeholder.before = anchor;
        }
        Some(placeholder)
    }

    /// Ends the gesture by dropping the dragged row into the placeholder slot.
    ///
    /// Returns the new sequence for `order` (the current store order), or `None`
    /// when no gesture was in flight or the dragged id is not part of `order`.
    pub fn drop(&mut self, order: &[TaskId]) -> Option<Vec<TaskId>> {
        let DragState::Dragging {
            dragged,
            placeholder,
        } = std::mem::take(&mut self.state)
        else {
            return None;
        };

        let from = order.iter().position(|id| id == &dragged)?;
        let mut next: Vec<TaskId> = order.iter().filter(|id| **id != dragged).cloned().collect();
        let to = match placeholder.before {
            Some(anchor) if anchor == dragged => from,
            Some(anchor) => next
                .iter()
                .position(|id| id == &anchor)
                .unwrap_or(next.len()),
            None => next.len(),
        };
        debug!(id = %dragged, from, to, "drop");
        next.insert(to, dragged);
        Some(next)
    }

    /// Drag ended without a drop. Returns the id that was being dragged.
    pub fn cancel(&mut self) -> Option<TaskId> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { dragged, .. } => {
                debug!(id = %dragged, "drag cancelled");
                Some(dragged)
            }
            DragState::Idle => None,
        }
    }

    /// Index in `order` in front of which the view draws the placeholder.
    pub fn placeholder_slot(&self, order: &[TaskId]) -> Option<usize> {
        let placeholder = self.placeholder()?;
        Some(match &placeholder.before {
            Some(anchor) => order
                .iter()
                .position(|id| id == anchor)
                .unwrap_or(order.len()),
            None => order.len(),
        })
    }
}

/// The row whose midpoint is below `pointer_y` and closest to it, scanning in
/// document order. `None` when the pointer is past every midpoint.
pub fn insert_before(pointer_y: f64, rows: &[RowBox]) -> Option<&TaskId> {
    rows.iter()
        .fold((f64::NEG_INFINITY, None), |(closest, found), row| {
            let offset = pointer_y - row.midpoint();
            if offset < 0.0 && offset > closest {
                (offset, Some(&row.id))
            } else {
                (closest, found)
            }
        })
        .1
}
