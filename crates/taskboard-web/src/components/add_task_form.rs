use taskboard_core::task::Priority;
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  SubmitEvent
};
use yew::{
  Callback,
  Event,
  Html,
  InputEvent,
  Properties,
  TargetCast,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct AddTaskFormProps {
  /// Raw title and priority, as
  /// typed. Validation happens in the
  /// store.
  pub on_add: Callback<(String, String)>,
  pub error:  Option<String>
}

#[function_component(AddTaskForm)]
pub fn add_task_form(
  props: &AddTaskFormProps
) -> Html {
  let title = use_state(String::new);
  let priority = use_state(|| {
    Priority::Medium.as_str().to_string()
  });

  let on_title = {
    let title = title.clone();
    Callback::from(
      move |event: InputEvent| {
        let input: HtmlInputElement =
          event.target_unchecked_into();
        title.set(input.value());
      }
    )
  };

  let on_priority = {
    let priority = priority.clone();
    Callback::from(move |event: Event| {
      let select: HtmlSelectElement =
        event.target_unchecked_into();
      priority.set(select.value());
    })
  };

  let onsubmit = {
    let title = title.clone();
    let priority = priority.clone();
    let on_add = props.on_add.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        let raw = (*title).trim().to_string();
        if raw.is_empty() {
          return;
        }
        on_add.emit((
          raw,
          (*priority).to_lowercase()
        ));
        title.set(String::new());
        priority.set(
          Priority::Medium
            .as_str()
            .to_string()
        );
      }
    )
  };

  html! {
      <form id="addTaskForm" class="add-task" {onsubmit}>
          <input
              type="text"
              name="title"
              placeholder="What needs doing?"
              value={(*title).clone()}
              oninput={on_title}
          />
          <select name="priority" onchange={on_priority}>
              {
                  for Priority::ALL.into_iter().map(|option| html! {
                      <option
                          value={option.as_str()}
                          selected={*priority == option.as_str()}
                      >
                          { option.label() }
                      </option>
                  })
              }
          </select>
          <button type="submit" class="btn btn-add">{ "Add" }</button>
          {
              match &props.error {
                  Some(error) => html! { <div class="form-error">{ error }</div> },
                  None => html! {},
              }
          }
      </form>
  }
}
