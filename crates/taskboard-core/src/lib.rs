pub mod cli;
pub mod commands;
pub mod config;
pub mod drag;
pub mod render;
pub mod snapshot;
pub mod stats;
pub mod store;
pub mod task;
pub mod timer;

use std::ffi::OsString;

use clap::Parser;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let pre =
    cli::preprocess_args(&raw_args)?;
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting taskboard CLI"
  );
  debug!(?pre.rc_overrides, "preprocessed rc overrides");

  let mut cfg = config::Config::load(
    cli.config.as_deref()
  )?;
  cfg.apply_overrides(
    pre.rc_overrides.into_iter().chain(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    )
  );
  let settings =
    config::Settings::from_config(&cfg)?;

  let renderer =
    render::Renderer::new(&settings);

  commands::dispatch(
    &settings,
    &renderer,
    cli.command
  )?;

  info!("done");
  Ok(())
}
