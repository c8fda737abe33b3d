use gloo::events::EventListener;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html,
  use_effect_with,
  use_state
};

use crate::dom;

pub const LOGOUT_PROMPT: &str =
  "Are you sure you want to logout?";
const LOGOUT_HREF: &str = "/logout";

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
  pub mobile_breakpoint: u32
}

fn is_narrow(breakpoint: u32) -> bool {
  dom::window_width().is_some_and(
    |width| width <= f64::from(breakpoint)
  )
}

#[function_component(Sidebar)]
pub fn sidebar(
  props: &SidebarProps
) -> Html {
  let breakpoint = props.mobile_breakpoint;
  let narrow =
    use_state(|| is_narrow(breakpoint));
  let open = use_state(|| false);

  {
    let narrow = narrow.clone();
    use_effect_with(
      breakpoint,
      move |breakpoint| {
        let breakpoint = *breakpoint;
        let listener =
          web_sys::window().map(|window| {
            EventListener::new(
              &window,
              "resize",
              move |_| {
                narrow.set(is_narrow(
                  breakpoint
                ));
              }
            )
          });
        move || drop(listener)
      }
    );
  }

  let on_toggle = {
    let open = open.clone();
    Callback::from(move |_: MouseEvent| {
      open.set(!*open);
    })
  };

  let on_logout = Callback::from(
    move |_: MouseEvent| {
      if dom::confirm(LOGOUT_PROMPT) {
        tracing::info!("logging out");
        dom::navigate(LOGOUT_HREF);
      }
    }
  );

  html! {
      <>
          <button
              type="button"
              class="mobile-toggle"
              style={if *narrow { "display: block;" } else { "display: none;" }}
              onclick={on_toggle}
          >
              { "☰" }
          </button>
          <nav class={classes!("sidebar", open.then_some("mobile-open"))}>
              <div class="brand">{ "Taskboard" }</div>
              <a class="item active" href="/home">{ "Dashboard" }</a>
              <button type="button" class="item logout" onclick={on_logout}>{ "Logout" }</button>
          </nav>
      </>
  }
}
