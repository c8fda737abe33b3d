use chrono::Utc;
use gloo::timers::callback::Interval;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html,
  use_effect_with,
  use_reducer
};

use crate::state::{
  StopwatchAction,
  StopwatchState
};

#[derive(Properties, PartialEq)]
pub struct StopwatchWidgetProps {
  pub tick_ms: u32
}

#[function_component(StopwatchWidget)]
pub fn stopwatch_widget(
  props: &StopwatchWidgetProps
) -> Html {
  let state = use_reducer(|| {
    StopwatchState::new(Utc::now())
  });

  {
    let dispatcher = state.dispatcher();
    let tick_ms = props.tick_ms;
    use_effect_with(
      state.watch.is_running(),
      move |running| {
        let ticker = running.then(|| {
          Interval::new(tick_ms, move || {
            dispatcher.dispatch(
              StopwatchAction::Tick(
                Utc::now()
              )
            );
          })
        });
        move || drop(ticker)
      }
    );
  }

  let on_start = {
    let state = state.clone();
    Callback::from(move |_: MouseEvent| {
      state.dispatch(
        StopwatchAction::Start(Utc::now())
      )
    })
  };
  let on_stop = {
    let state = state.clone();
    Callback::from(move |_: MouseEvent| {
      state.dispatch(
        StopwatchAction::Stop(Utc::now())
      )
    })
  };
  let on_reset = {
    let state = state.clone();
    Callback::from(move |_: MouseEvent| {
      state.dispatch(StopwatchAction::Reset)
    })
  };

  html! {
      <section class="widget stopwatch">
          <h3>{ "Stopwatch" }</h3>
          <div id="stopwatch" class="clock">{ state.display() }</div>
          <div class="controls">
              <button type="button" class="btn" onclick={on_start}>{ "Start" }</button>
              <button type="button" class="btn" onclick={on_stop}>{ "Stop" }</button>
              <button type="button" class="btn" onclick={on_reset}>{ "Reset" }</button>
          </div>
      </section>
  }
}
