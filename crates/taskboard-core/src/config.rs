use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

use crate::timer::DEFAULT_COUNTDOWN_MINUTES;

pub const RC_ENV: &str = "TASKBOARDRC";
pub const RC_FILE_NAME: &str =
  ".taskboardrc";

#[derive(Debug, Clone)]
pub struct Config {
  map: HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    for (key, value) in [
      (
        "countdown.minutes",
        DEFAULT_COUNTDOWN_MINUTES
          .to_string()
      ),
      ("tick.ms", "1000".to_string()),
      (
        "transition.exit.ms",
        "300".to_string()
      ),
      (
        "transition.pulse.ms",
        "150".to_string()
      ),
      (
        "mobile.breakpoint",
        "768".to_string()
      ),
      ("color", "on".to_string())
    ] {
      map.insert(key.to_string(), value);
    }

    Self {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    let rc = resolve_rc_path(
      rc_override
    )?;
    if let Some(path) = rc {
      info!(rc = %path.display(), "loading taskboardrc");
      cfg.load_file(&path)?;
    } else {
      debug!(
        "no taskboardrc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  /// Parses rc text that has no
  /// file behind it, such as an
  /// inline page element. `include`
  /// lines are skipped.
  pub fn load_str(
    &mut self,
    origin: &str,
    text: &str
  ) -> anyhow::Result<()> {
    self.load_lines(origin, text, None)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> Option<bool> {
    self
      .map
      .get(key)
      .map(|v| parse_bool(v))
  }

  pub fn get_u32(
    &self,
    key: &str
  ) -> anyhow::Result<Option<u32>> {
    self
      .map
      .get(key)
      .map(|v| {
        v.trim().parse::<u32>().with_context(
          || {
            format!(
              "invalid value for \
               {key}: {v}"
            )
          }
        )
      })
      .transpose()
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    self
      .loaded_files
      .push(path.clone());

    let base_dir = path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    self.load_lines(
      &path.display().to_string(),
      &text,
      Some(&base_dir)
    )
  }

  fn load_lines(
    &mut self,
    origin: &str,
    text: &str,
    base_dir: Option<&Path>
  ) -> anyhow::Result<()> {
    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let mut line = raw_line.trim();
      if line.is_empty()
        || line.starts_with('#')
      {
        continue;
      }

      if let Some((before, _)) =
        line.split_once('#')
      {
        line = before.trim();
      }

      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let Some(base_dir) = base_dir
        else {
          warn!(
            origin,
            line = line_num + 1,
            "include not supported \
             here; skipping"
          );
          continue;
        };
        let include_path =
          resolve_include_path(
            base_dir,
            include_rest.trim()
          )?;
        debug!(
            origin,
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        if include_path.exists() {
          self
            .load_file(&include_path)?;
        } else {
          warn!(include = %include_path.display(), "include file does not exist; skipping");
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            origin,
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    Ok(())
  }
}

/// Typed view of the keys the
/// dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub countdown_minutes:  u32,
  pub tick_ms:            u32,
  pub exit_transition_ms: u32,
  pub pulse_ms:           u32,
  pub mobile_breakpoint:  u32,
  pub color:              bool
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      countdown_minutes:
        DEFAULT_COUNTDOWN_MINUTES,
      tick_ms:            1000,
      exit_transition_ms: 300,
      pulse_ms:           150,
      mobile_breakpoint:  768,
      color:              true
    }
  }
}

impl Settings {
  pub fn from_config(
    cfg: &Config
  ) -> anyhow::Result<Self> {
    let defaults = Settings::default();
    let tick_ms = cfg
      .get_u32("tick.ms")?
      .unwrap_or(defaults.tick_ms);
    if tick_ms == 0 {
      return Err(anyhow!(
        "tick.ms must be greater than \
         zero"
      ));
    }

    Ok(Self {
      countdown_minutes: cfg
        .get_u32("countdown.minutes")?
        .unwrap_or(
          defaults.countdown_minutes
        ),
      tick_ms,
      exit_transition_ms: cfg
        .get_u32("transition.exit.ms")?
        .unwrap_or(
          defaults.exit_transition_ms
        ),
      pulse_ms: cfg
        .get_u32("transition.pulse.ms")?
        .unwrap_or(defaults.pulse_ms),
      mobile_breakpoint: cfg
        .get_u32("mobile.breakpoint")?
        .unwrap_or(
          defaults.mobile_breakpoint
        ),
      color: cfg
        .get_bool("color")
        .unwrap_or(defaults.color)
    })
  }
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_rc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(rc_env) =
    std::env::var(RC_ENV)
  {
    if rc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      rc_env
    )));
  }

  let Some(home) = dirs::home_dir()
  else {
    warn!(
      "cannot determine home \
       directory; skipping \
       taskboardrc"
    );
    return Ok(None);
  };
  let candidate =
    home.join(RC_FILE_NAME);
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.trim().is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let raw = PathBuf::from(include);
  let expanded = expand_tilde(&raw);
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> bool {
  matches!(
    s.trim()
      .to_ascii_lowercase()
      .as_str(),
    "1" | "y" | "yes" | "on" | "true"
  )
}

#[cfg(test)]
mod tests {
  use super::{
    Config,
    Settings
  };

  #[test]
  fn defaults_map_to_default_settings()
  {
    let settings =
      Settings::from_config(
        &Config::default()
      )
      .expect("settings");
    assert_eq!(
      settings,
      Settings::default()
    );
  }

  #[test]
  fn inline_text_and_overrides() {
    let mut cfg = Config::default();
    cfg
      .load_str(
        "inline",
        "# dashboard\n\
         countdown.minutes = 5  # \
         short\n\
         include other.rc\n\
         color = off\n"
      )
      .expect("parse");
    cfg.apply_overrides(vec![(
      "rc.transition.exit.ms"
        .to_string(),
      "0".to_string()
    )]);

    let settings =
      Settings::from_config(&cfg)
        .expect("settings");
    assert_eq!(
      settings.countdown_minutes,
      5
    );
    assert!(!settings.color);
    assert_eq!(
      settings.exit_transition_ms,
      0
    );
    assert_eq!(settings.tick_ms, 1000);
  }

  #[test]
  fn bad_lines_and_values_are_rejected()
  {
    let mut cfg = Config::default();
    let err = cfg
      .load_str(
        "inline",
        "tick.ms 5"
      )
      .expect_err("missing '='");
    assert!(
      err
        .to_string()
        .contains("inline:1")
    );

    cfg.apply_overrides(vec![(
      "tick.ms".to_string(),
      "soon".to_string()
    )]);
    assert!(
      Settings::from_config(&cfg)
        .is_err()
    );

    cfg.apply_overrides(vec![(
      "tick.ms".to_string(),
      "0".to_string()
    )]);
    assert!(
      Settings::from_config(&cfg)
        .is_err()
    );
  }
}
