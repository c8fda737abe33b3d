mod app;
mod components;
mod dom;
mod state;

use taskboard_core::snapshot;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  tracing::info!(
    "starting taskboard frontend"
  );

  let settings = dom::read_settings();
  // Rows that fail validation are logged
  // and left out; App imports the rest.
  let (seed, _rejected) =
    snapshot::validate(
      dom::take_seed_tasks()
    );

  let mount = dom::document()
    .and_then(|document| {
      document.get_element_by_id("app")
    })
    .expect(
      "missing #app mount element"
    );

  yew::Renderer::<app::App>::with_root_and_props(
    mount,
    app::AppProps {
      seed,
      settings
    }
  )
  .render();
}
