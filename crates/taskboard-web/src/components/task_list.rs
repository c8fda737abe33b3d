use taskboard_core::task::{
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskRow;
use crate::dom::TASK_LIST_ID;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub tasks:              Vec<Task>,
  pub view_empty:         bool,
  pub dragging:           Option<TaskId>,
  pub placeholder_slot:   Option<usize>,
  pub placeholder_height: f64,
  pub entering:           Option<TaskId>,
  pub pulsing:            Option<TaskId>,
  pub on_toggle:          Callback<TaskId>,
  pub on_delete:          Callback<TaskId>,
  pub on_drag_start:
    Callback<(TaskId, f64)>,
  pub on_drag_end:        Callback<()>,
  pub transition_ms:      u32
}

pub fn placeholder_style(
  height: f64
) -> String {
  format!(
    "height: {height}px; background: #f8f9fa; \
     border: 2px dashed #dee2e6; margin: 8px 0; \
     border-radius: 8px; opacity: 0.7; list-style: none;"
  )
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  let placeholder = html! {
      <li
          key="drag-placeholder"
          class="task-placeholder"
          style={placeholder_style(props.placeholder_height)}
      ></li>
  };

  let mut rows: Vec<Html> = props
    .tasks
    .iter()
    .map(|task| {
      html! {
          <TaskRow
              key={task.id.to_string()}
              task={task.clone()}
              is_dragging={props.dragging.as_ref() == Some(&task.id)}
              entering={props.entering.as_ref() == Some(&task.id)}
              pulsing={props.pulsing.as_ref() == Some(&task.id)}
              on_toggle={props.on_toggle.clone()}
              on_delete={props.on_delete.clone()}
              on_drag_start={props.on_drag_start.clone()}
              on_drag_end={props.on_drag_end.clone()}
              transition_ms={props.transition_ms}
          />
      }
    })
    .collect();

  if let Some(slot) =
    props.placeholder_slot
  {
    rows.insert(
      slot.min(rows.len()),
      placeholder
    );
  }

  html! {
      <ul id={TASK_LIST_ID} class="task-list">
          { for rows }
          <li
              id="emptyState"
              class="task-item empty-state"
              style={if props.view_empty { "display: block;" } else { "display: none;" }}
          >
              { "No tasks yet. Add one above to get started." }
          </li>
      </ul>
  }
}

#[cfg(test)]
mod task_list_tests {
  use super::*;

  #[test]
  fn placeholder_is_dashed_at_row_height() {
    let style = placeholder_style(42.5);
    assert!(style.starts_with("height: 42.5px;"));
    assert!(style.contains("2px dashed"));
    assert!(style.contains("opacity: 0.7"));
  }
}
