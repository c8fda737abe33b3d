use chrono::Utc;
use gloo::timers::future::TimeoutFuture;
use taskboard_core::config::Settings;
use taskboard_core::store::TaskStore;
use taskboard_core::task::{
  Task,
  TaskId
};
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  Properties,
  UseReducerDispatcher,
  function_component,
  html,
  use_effect_with,
  use_reducer
};

use crate::components::{
  AddTaskForm,
  CountdownWidget,
  ProgressBar,
  Sidebar,
  StatsPanel,
  StopwatchWidget,
  TaskList
};
use crate::dom;
use crate::state::{
  Dashboard,
  DashboardAction
};

/// One animation frame; the entering
/// class is dropped after it so the
/// transition runs.
const ENTER_FRAME_MS: u32 = 16;

#[derive(Properties, PartialEq)]
pub struct AppProps {
  pub seed:     Vec<Task>,
  pub settings: Settings
}

fn dispatch_after(
  dispatcher: UseReducerDispatcher<
    Dashboard
  >,
  delay_ms: u32,
  action: DashboardAction
) {
  wasm_bindgen_futures::spawn_local(
    async move {
      TimeoutFuture::new(delay_ms).await;
      dispatcher.dispatch(action);
    }
  );
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
  let seed = props.seed.clone();
  let dashboard = use_reducer(move || {
    Dashboard::new(TaskStore::import(seed))
  });
  let settings = &props.settings;

  {
    let dispatcher = dashboard.dispatcher();
    use_effect_with(
      dashboard.entering.clone(),
      move |entering| {
        if let Some(id) = entering.clone() {
          dispatch_after(
            dispatcher,
            ENTER_FRAME_MS,
            DashboardAction::EnterDone(id)
          );
        }
        || ()
      }
    );
  }

  {
    let dispatcher = dashboard.dispatcher();
    let pulse_ms = settings.pulse_ms;
    use_effect_with(
      dashboard.pulsing.clone(),
      move |pulsing| {
        if let Some(id) = pulsing.clone() {
          dispatch_after(
            dispatcher,
            pulse_ms,
            DashboardAction::PulseDone(id)
          );
        }
        || ()
      }
    );
  }

  let on_add = {
    let dispatcher = dashboard.dispatcher();
    Callback::from(
      move |(title, priority): (
        String,
        String
      )| {
        dispatcher.dispatch(
          DashboardAction::Add {
            title,
            priority,
            now: Utc::now()
          }
        );
      }
    )
  };

  let on_toggle = {
    let dispatcher = dashboard.dispatcher();
    Callback::from(move |id: TaskId| {
      dispatcher
        .dispatch(DashboardAction::Toggle(id));
    })
  };

  let on_delete = {
    let dispatcher = dashboard.dispatcher();
    let exit_ms =
      settings.exit_transition_ms;
    Callback::from(move |id: TaskId| {
      dispatcher.dispatch(
        DashboardAction::BeginRemoval(
          id.clone()
        )
      );
      // The reducer ignores this unless
      // the row is still leaving.
      dispatch_after(
        dispatcher.clone(),
        exit_ms,
        DashboardAction::CompleteRemoval(id)
      );
    })
  };

  let on_drag_start = {
    let dispatcher = dashboard.dispatcher();
    Callback::from(
      move |(id, height): (TaskId, f64)| {
        tracing::debug!(%id, height, "drag start");
        dispatcher.dispatch(
          DashboardAction::DragStart {
            id,
            height
          }
        );
      }
    )
  };

  // Drag-over and drop cover the whole
  // layout, not just the list.
  let ondragover = {
    let dispatcher = dashboard.dispatcher();
    let active =
      dashboard.drag.dragged().is_some();
    Callback::from(
      move |event: DragEvent| {
        if !active {
          return;
        }
        event.prevent_default();
        dispatcher.dispatch(
          DashboardAction::DragOver {
            pointer_y: f64::from(
              event.client_y()
            ),
            rows: dom::task_list_rows()
          }
        );
      }
    )
  };

  let ondrop = {
    let dispatcher = dashboard.dispatcher();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        dispatcher
          .dispatch(DashboardAction::Drop);
      }
    )
  };

  let on_drag_end = {
    let dispatcher = dashboard.dispatcher();
    Callback::from(move |_: ()| {
      dispatcher
        .dispatch(DashboardAction::DragEnd);
    })
  };

  let stats = dashboard.stats();
  let placeholder_height = dashboard
    .drag
    .placeholder()
    .map(|placeholder| placeholder.height)
    .unwrap_or_default();

  html! {
      <div class="layout" {ondragover} {ondrop}>
          <Sidebar mobile_breakpoint={settings.mobile_breakpoint} />
          <main class="content">
              <StatsPanel stats={stats.clone()} />
              <ProgressBar
                  completion_rate={stats.completion_rate}
                  label={stats.progress_label()}
              />
              <AddTaskForm on_add={on_add} error={dashboard.form_error.clone()} />
              <TaskList
                  tasks={dashboard.store.tasks().to_vec()}
                  view_empty={dashboard.store.is_view_empty()}
                  dragging={dashboard.drag.dragged().cloned()}
                  placeholder_slot={dashboard.placeholder_slot()}
                  placeholder_height={placeholder_height}
                  entering={dashboard.entering.clone()}
                  pulsing={dashboard.pulsing.clone()}
                  on_toggle={on_toggle}
                  on_delete={on_delete}
                  on_drag_start={on_drag_start}
                  on_drag_end={on_drag_end}
                  transition_ms={settings.exit_transition_ms}
              />
              <div class="widgets">
                  <CountdownWidget
                      minutes={settings.countdown_minutes}
                      tick_ms={settings.tick_ms}
                  />
                  <StopwatchWidget tick_ms={settings.tick_ms} />
              </div>
          </main>
      </div>
  }
}
