use std::rc::Rc;

use chrono::{
  DateTime,
  Utc
};
use taskboard_core::drag::{
  DragReorder,
  RowBox
};
use taskboard_core::stats::Stats;
use taskboard_core::store::TaskStore;
use taskboard_core::task::TaskId;
use taskboard_core::timer::{
  Countdown,
  CountdownTick,
  Stopwatch
};
use yew::Reducible;

/// Everything the task list shows.
/// The store is the only source of
/// truth after the seed import.
#[derive(Clone, Debug, Default)]
pub struct Dashboard {
  pub store:      TaskStore,
  pub drag:       DragReorder,
  /// Row playing the add animation.
  pub entering:   Option<TaskId>,
  /// Row playing the completion
  /// pulse.
  pub pulsing:    Option<TaskId>,
  pub form_error: Option<String>
}

#[derive(Debug, Clone)]
pub enum DashboardAction {
  Add {
    title:    String,
    priority: String,
    now:      DateTime<Utc>
  },
  Toggle(TaskId),
  BeginRemoval(TaskId),
  CompleteRemoval(TaskId),
  EnterDone(TaskId),
  PulseDone(TaskId),
  DragStart {
    id:     TaskId,
    height: f64
  },
  DragOver {
    pointer_y: f64,
    rows:      Vec<RowBox>
  },
  Drop,
  DragEnd
}

impl Dashboard {
  pub fn new(store: TaskStore) -> Self {
    Self {
      store,
      ..Self::default()
    }
  }

  pub fn stats(&self) -> Stats {
    Stats::project(&self.store)
  }

  /// Where the placeholder row goes,
  /// if a drag is in flight.
  pub fn placeholder_slot(
    &self
  ) -> Option<usize> {
    self
      .drag
      .placeholder_slot(&self.store.ids())
  }

  pub fn apply(
    &mut self,
    action: DashboardAction
  ) {
    match action {
      | DashboardAction::Add {
        title,
        priority,
        now
      } => {
        match self
          .store
          .add_from_input(
            &title, &priority, now
          ) {
          | Ok(id) => {
            tracing::info!(%id, "task added");
            self.entering = Some(id);
            self.form_error = None;
          }
          | Err(error) => {
            tracing::warn!(
              %error,
              title,
              priority,
              "rejected new task"
            );
            self.form_error =
              Some(error.to_string());
          }
        }
      }
      | DashboardAction::Toggle(id) => {
        if let Some(completed) =
          self.store.toggle_completion(&id)
        {
          tracing::debug!(
            %id,
            completed,
            "task toggled"
          );
          self.pulsing = Some(id);
        }
      }
      | DashboardAction::BeginRemoval(
        id
      ) => {
        if self.store.begin_removal(&id)
        {
          tracing::debug!(
            %id,
            "task leaving"
          );
        }
      }
      | DashboardAction::CompleteRemoval(
        id
      ) => {
        if self
          .store
          .complete_removal(&id)
          .is_some()
        {
          tracing::info!(%id, "task removed");
          if self.pulsing.as_ref()
            == Some(&id)
          {
            self.pulsing = None;
          }
          if self.drag.is_dragging(&id) {
            self.drag.cancel();
          }
        }
      }
      | DashboardAction::EnterDone(
        id
      ) => {
        if self.entering.as_ref()
          == Some(&id)
        {
          self.entering = None;
        }
      }
      | DashboardAction::PulseDone(
        id
      ) => {
        if self.pulsing.as_ref()
          == Some(&id)
        {
          self.pulsing = None;
        }
      }
      | DashboardAction::DragStart {
        id,
        height
      } => {
        if self.store.get(&id).is_some()
        {
          self.drag.begin(id, height);
        }
      }
      | DashboardAction::DragOver {
        pointer_y,
        rows
      } => {
        self
          .drag
          .hover(pointer_y, &rows);
      }
      | DashboardAction::Drop => {
        let order = self.store.ids();
        if let Some(next) =
          self.drag.drop(&order)
        {
          tracing::info!(
            len = next.len(),
            "committing dragged order"
          );
          self.store.reorder(&next);
        }
      }
      | DashboardAction::DragEnd => {
        self.drag.cancel();
      }
    }
  }
}

impl Reducible for Dashboard {
  type Action = DashboardAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    next.apply(action);
    Rc::new(next)
  }
}

#[derive(Clone, Debug, Default)]
pub struct CountdownState {
  pub countdown:   Countdown,
  /// Bumped on every start so the
  /// view replaces its ticker.
  pub run:         u32,
  pub expirations: u32
}

#[derive(Debug, Clone, Copy)]
pub enum CountdownAction {
  Set(u32),
  Start,
  Stop,
  Reset,
  Tick
}

impl CountdownState {
  pub fn new(minutes: u32) -> Self {
    Self {
      countdown: Countdown::new(minutes),
      ..Self::default()
    }
  }

  pub fn apply(
    &mut self,
    action: CountdownAction
  ) {
    match action {
      | CountdownAction::Set(minutes) => {
        self.countdown.set(minutes)
      }
      | CountdownAction::Start => {
        if self.countdown.start() {
          self.run =
            self.run.wrapping_add(1);
        }
      }
      | CountdownAction::Stop => {
        self.countdown.stop()
      }
      | CountdownAction::Reset => {
        self.countdown.reset()
      }
      | CountdownAction::Tick => {
        if self.countdown.tick()
          == CountdownTick::Expired
        {
          self.expirations += 1;
        }
      }
    }
  }
}

impl Reducible for CountdownState {
  type Action = CountdownAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    next.apply(action);
    Rc::new(next)
  }
}

#[derive(Clone, Debug)]
pub struct StopwatchState {
  pub watch: Stopwatch,
  pub now:   DateTime<Utc>
}

#[derive(Debug, Clone, Copy)]
pub enum StopwatchAction {
  Start(DateTime<Utc>),
  Stop(DateTime<Utc>),
  Reset,
  Tick(DateTime<Utc>)
}

impl StopwatchState {
  pub fn new(now: DateTime<Utc>) -> Self {
    Self {
      watch: Stopwatch::new(),
      now
    }
  }

  pub fn display(&self) -> String {
    self.watch.display(self.now)
  }

  pub fn apply(
    &mut self,
    action: StopwatchAction
  ) {
    match action {
      | StopwatchAction::Start(now) => {
        self.now = now;
        self.watch.start(now);
      }
      | StopwatchAction::Stop(now) => {
        self.now = now;
        self.watch.stop(now);
      }
      | StopwatchAction::Reset => {
        self.watch.reset()
      }
      | StopwatchAction::Tick(now) => {
        self.now = now
      }
    }
  }
}

impl Reducible for StopwatchState {
  type Action = StopwatchAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    next.apply(action);
    Rc::new(next)
  }
}
