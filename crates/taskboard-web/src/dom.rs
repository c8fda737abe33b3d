//! Reads from the page: the seed
//! task markup, the inline rc block
//! and row geometry while dragging.

use taskboard_core::config::{
  Config,
  Settings
};
use taskboard_core::drag::RowBox;
use taskboard_core::snapshot::TaskSnapshot;
use taskboard_core::task::TaskId;
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element
};

pub const TASK_ROW_SELECTOR: &str =
  ".task-item:not(.empty-state)";
pub const TASK_LIST_ID: &str = "taskList";
const CONFIG_ELEMENT_ID: &str =
  "taskboard-config";

pub fn document() -> Option<Document> {
  web_sys::window()
    .and_then(|window| window.document())
}

fn elements(
  root: &Element,
  selector: &str
) -> Vec<Element> {
  let Ok(list) =
    root.query_selector_all(selector)
  else {
    tracing::warn!(
      selector,
      "invalid selector"
    );
    return vec![];
  };

  (0..list.length())
    .filter_map(|idx| list.get(idx))
    .filter_map(|node| {
      node.dyn_into::<Element>().ok()
    })
    .collect()
}

/// One-time import of the tasks the
/// server rendered into the page. The
/// seed rows are removed afterwards so
/// only the app renders tasks.
pub fn take_seed_tasks()
-> Vec<TaskSnapshot> {
  let Some(root) = document()
    .and_then(|doc| {
      doc.document_element()
    })
  else {
    return vec![];
  };

  let seeds =
    elements(&root, TASK_ROW_SELECTOR);
  let snapshots = seeds
    .iter()
    .filter_map(|element| {
      let id = element
        .get_attribute("data-task-id")?;
      let priority = element
        .get_attribute("data-priority")
        .unwrap_or_default();
      let title = element
        .query_selector(".task-title")
        .ok()
        .flatten()
        .and_then(|node| {
          node.text_content()
        })
        .unwrap_or_default();
      Some(TaskSnapshot {
        id,
        title: title.trim().to_string(),
        priority,
        completed: element
          .class_list()
          .contains("completed")
      })
    })
    .collect::<Vec<_>>();

  for element in &seeds {
    element.remove();
  }

  tracing::info!(
    found = seeds.len(),
    imported = snapshots.len(),
    "read seed tasks from page"
  );
  snapshots
}

/// Settings from an optional
/// `<script id="taskboard-config"
/// type="text/plain">` block.
pub fn read_settings() -> Settings {
  let text = document()
    .and_then(|doc| {
      doc.get_element_by_id(
        CONFIG_ELEMENT_ID
      )
    })
    .and_then(|element| {
      element.text_content()
    });

  let Some(text) = text else {
    return Settings::default();
  };

  let mut cfg = Config::default();
  let parsed = cfg
    .load_str(CONFIG_ELEMENT_ID, &text)
    .and_then(|_| {
      Settings::from_config(&cfg)
    });
  match parsed {
    | Ok(settings) => {
      tracing::debug!(
        ?settings,
        "loaded inline settings"
      );
      settings
    }
    | Err(error) => {
      tracing::error!(
        error = %format!("{error:#}"),
        "invalid inline settings; \
         using defaults"
      );
      Settings::default()
    }
  }
}

/// Geometry of the rendered task rows
/// under `list`, in document order.
/// The placeholder is not a
/// `.task-item` and never shows up.
fn row_boxes(
  list: &Element
) -> Vec<RowBox> {
  elements(list, TASK_ROW_SELECTOR)
    .into_iter()
    .filter_map(|element| {
      let id = element
        .get_attribute("data-task-id")
        .and_then(|raw| {
          TaskId::new(raw).ok()
        })?;
      let rect =
        element.get_bounding_client_rect();
      Some(RowBox {
        id,
        top: rect.top(),
        height: rect.height()
      })
    })
    .collect()
}

/// Row geometry of the rendered task
/// list, or nothing if it is not
/// mounted.
pub fn task_list_rows() -> Vec<RowBox> {
  document()
    .and_then(|doc| {
      doc.get_element_by_id(TASK_LIST_ID)
    })
    .map(|list| row_boxes(&list))
    .unwrap_or_default()
}

pub fn window_width() -> Option<f64> {
  web_sys::window()
    .and_then(|window| {
      window.inner_width().ok()
    })
    .and_then(|width| width.as_f64())
}

pub fn confirm(message: &str) -> bool {
  web_sys::window()
    .and_then(|window| {
      window
        .confirm_with_message(message)
        .ok()
    })
    .unwrap_or(false)
}

pub fn alert(message: &str) {
  if let Some(window) = web_sys::window()
    && let Err(error) =
      window.alert_with_message(message)
  {
    tracing::warn!(
      ?error,
      "alert failed"
    );
  }
}

pub fn navigate(href: &str) {
  if let Some(window) = web_sys::window()
    && let Err(error) =
      window.location().set_href(href)
  {
    tracing::error!(
      ?error,
      href,
      "navigation failed"
    );
  }
}
