use gloo::timers::callback::Interval;
use taskboard_core::commands::TIMES_UP;
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

use crate::dom;
use crate::state::{
  CountdownAction,
  CountdownState
};

const PRESETS: [u32; 4] = [1, 5, 15, 25];

#[derive(Properties, PartialEq)]
pub struct CountdownWidgetProps {
  pub minutes: u32,
  pub tick_ms: u32
}

#[function_component(CountdownWidget)]
pub fn countdown_widget(
  props: &CountdownWidgetProps
) -> Html {
  let minutes = props.minutes;
  let state = use_reducer(move || {
    CountdownState::new(minutes)
  });

  {
    // One ticker per run; starting
    // again or stopping drops it.
    let dispatcher = state.dispatcher();
    let tick_ms = props.tick_ms;
    use_effect_with(
      (
        state.run,
        state.countdown.is_running()
      ),
      move |(run, running)| {
        let ticker = running.then(|| {
          tracing::debug!(
            run,
            tick_ms,
            "countdown ticker started"
          );
          Interval::new(tick_ms, move || {
            dispatcher.dispatch(
              CountdownAction::Tick
            );
          })
        });
        move || drop(ticker)
      }
    );
  }

  use_effect_with(
    state.expirations,
    move |expirations| {
      if *expirations > 0 {
        dom::alert(TIMES_UP);
      }
      || ()
    }
  );

  let action = |action: CountdownAction| {
    let state = state.clone();
    Callback::from(move |_: MouseEvent| {
      state.dispatch(action)
    })
  };

  html! {
      <section class="widget countdown">
          <h3>{ "Countdown" }</h3>
          <div id="countdown-display" class="clock">{ state.countdown.display() }</div>
          <div class="presets">
              {
                  for PRESETS.into_iter().map(|preset| html! {
                      <button type="button" class="btn" onclick={action(CountdownAction::Set(preset))}>
                          { format!("{preset} min") }
                      </button>
                  })
              }
          </div>
          <div class="controls">
              <button type="button" class="btn" onclick={action(CountdownAction::Start)}>{ "Start" }</button>
              <button type="button" class="btn" onclick={action(CountdownAction::Stop)}>{ "Stop" }</button>
              <button type="button" class="btn" onclick={action(CountdownAction::Reset)}>{ "Reset" }</button>
          </div>
      </section>
  }
}
