mod add_task_form;
mod countdown_widget;
mod sidebar;
mod stats_panel;
mod stopwatch_widget;
mod task_list;
mod task_row;

pub use add_task_form::AddTaskForm;
pub use countdown_widget::CountdownWidget;
pub use sidebar::Sidebar;
pub use stats_panel::{
  ProgressBar,
  StatsPanel
};
pub use stopwatch_widget::StopwatchWidget;
pub use task_list::TaskList;
pub use task_row::TaskRow;
