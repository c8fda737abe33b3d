use taskboard_core::task::{
  Task,
  TaskId
};
use web_sys::{
  DragEvent,
  Element
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  NodeRef,
  Properties,
  classes,
  function_component,
  html,
  use_node_ref
};

#[derive(Properties, PartialEq)]
pub struct TaskRowProps {
  pub task:          Task,
  pub is_dragging:   bool,
  pub entering:      bool,
  pub pulsing:       bool,
  pub on_toggle:     Callback<TaskId>,
  pub on_delete:     Callback<TaskId>,
  pub on_drag_start: Callback<(TaskId, f64)>,
  pub on_drag_end:   Callback<()>,
  /// Duration of the enter, exit and
  /// pulse transitions.
  pub transition_ms: u32
}

/// What a row looks like right now. The
/// first matching state wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLook {
  Leaving,
  Entering,
  Pulsing,
  Dragged,
  Resting
}

impl RowLook {
  pub fn of(
    leaving: bool,
    entering: bool,
    pulsing: bool,
    dragged: bool
  ) -> Self {
    match (leaving, entering, pulsing, dragged) {
      | (true, ..) => Self::Leaving,
      | (_, true, ..) => Self::Entering,
      | (_, _, true, _) => Self::Pulsing,
      | (.., true) => Self::Dragged,
      | _ => Self::Resting
    }
  }
}

pub fn row_style(
  look: RowLook,
  transition_ms: u32
) -> String {
  let state = match look {
    | RowLook::Leaving => {
      "opacity: 0; transform: translateX(-100%);"
    }
    | RowLook::Entering => {
      "opacity: 0; transform: translateY(-20px);"
    }
    | RowLook::Pulsing => {
      "opacity: 1; transform: scale(1.05);"
    }
    | RowLook::Dragged => {
      "opacity: 0.4; transform: none;"
    }
    | RowLook::Resting => {
      "opacity: 1; transform: none;"
    }
  };
  format!(
    "transition: all {transition_ms}ms ease; {state}"
  )
}

fn row_height(node: &NodeRef) -> f64 {
  node
    .cast::<Element>()
    .map(|element| {
      element
        .get_bounding_client_rect()
        .height()
    })
    .unwrap_or_default()
}

#[function_component(TaskRow)]
pub fn task_row(
  props: &TaskRowProps
) -> Html {
  let node = use_node_ref();
  let task_id = props.task.id.clone();
  let leaving = !props.task.is_active();

  let ondragstart = {
    let on_drag_start =
      props.on_drag_start.clone();
    let node = node.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |event: DragEvent| {
        if let Some(data_transfer) =
          event.data_transfer()
        {
          let _ = data_transfer
            .set_data(
              "text/plain",
              task_id.as_str()
            );
          data_transfer
            .set_effect_allowed("move");
        }
        on_drag_start.emit((
          task_id.clone(),
          row_height(&node)
        ));
      }
    )
  };

  let ondragend = {
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(move |_: DragEvent| {
      on_drag_end.emit(());
    })
  };

  let on_check = {
    let on_toggle =
      props.on_toggle.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.prevent_default();
        on_toggle.emit(task_id.clone());
      }
    )
  };

  let on_giveup = {
    let on_delete =
      props.on_delete.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |event: MouseEvent| {
        event.prevent_default();
        on_delete.emit(task_id.clone());
      }
    )
  };

  let priority = props.task.priority;
  let style = row_style(
    RowLook::of(
      leaving,
      props.entering,
      props.pulsing,
      props.is_dragging
    ),
    props.transition_ms
  );

  html! {
      <li
          ref={node}
          class={classes!(
              "task-item",
              props.task.completed.then_some("completed"),
              props.is_dragging.then_some("dragging"),
              props.entering.then_some("entering"),
              props.pulsing.then_some("pulse"),
              leaving.then_some("leaving"),
          )}
          style={style}
          draggable={(!leaving).to_string()}
          data-task-id={task_id.to_string()}
          data-priority={priority.as_str()}
          {ondragstart}
          {ondragend}
      >
          <span class={classes!("priority-circle", format!("priority-{}", priority.as_str()))} title={priority.label()}></span>
          <span class="task-title">{ &props.task.title }</span>
          <div class="task-actions">
              <button type="button" class="btn btn-check" onclick={on_check} disabled={leaving}>{ "✔" }</button>
              <button type="button" class="btn btn-giveup" onclick={on_giveup} disabled={leaving}>{ "🚫" }</button>
          </div>
      </li>
  }
}
