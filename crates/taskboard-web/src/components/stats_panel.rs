use taskboard_core::stats::Stats;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct StatsPanelProps {
  pub stats: Stats
}

#[function_component(StatsPanel)]
pub fn stats_panel(
  props: &StatsPanelProps
) -> Html {
  let stats = &props.stats;
  let card = |id: &'static str,
              label: &'static str,
              value: String| {
    html! {
        <div class="stat-card">
            <div class="stat-label">{ label }</div>
            <div class="stat-value" id={id}>{ value }</div>
        </div>
    }
  };

  html! {
      <section class="stats">
          { card("totalTasks", "Total", stats.total.to_string()) }
          { card("completedTasks", "Completed", stats.completed.to_string()) }
          { card("pendingTasks", "Pending", stats.pending.to_string()) }
          { card("completionRate", "Completion", stats.completion_label()) }
          { card("highPriorityCount", "High priority", stats.high_priority_label()) }
          { card("latestTask", "Latest", stats.latest_label().to_string()) }
      </section>
  }
}

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
  pub completion_rate: u8,
  pub label:           String
}

#[function_component(ProgressBar)]
pub fn progress_bar(
  props: &ProgressBarProps
) -> Html {
  html! {
      <div class="progress">
          <div
              id="progressBar"
              class="progress-bar"
              style={format!("width: {}%;", props.completion_rate)}
              data-completion={props.completion_rate.to_string()}
          ></div>
          <span id="progressText" class="progress-text">{ &props.label }</span>
      </div>
  }
}
