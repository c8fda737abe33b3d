use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::cli::Command;
use crate::config::Settings;
use crate::render::Renderer;
use crate::snapshot;
use crate::stats::Stats;
use crate::timer::{Countdown, CountdownTick};

pub const TIMES_UP: &str = "⏰ Time's up!";

#[instrument(skip(settings, renderer))]
pub fn dispatch(settings: &Settings, renderer: &Renderer, command: Command) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();

    match command {
        Command::List { snapshot } => {
            let store = snapshot::load_file(&snapshot)?;
            renderer.write_task_table(&mut out, store.tasks())?;
        }
        Command::Stats { snapshot } => {
            let store = snapshot::load_file(&snapshot)?;
            renderer.write_stats(&mut out, &Stats::project(&store))?;
        }
        Command::Countdown { minutes } => {
            let minutes = minutes.unwrap_or(settings.countdown_minutes);
            let tick = Duration::from_millis(u64::from(settings.tick_ms));
            let mut countdown = Countdown::new(minutes);
            run_countdown(&mut out, &mut countdown, || thread::sleep(tick))?;
        }
    }

    Ok(())
}

/// Drives `countdown` to expiry, redrawing the clock after every tick.
/// Returns the number of ticks taken.
pub fn run_countdown<W, F>(
    mut out: W,
    countdown: &mut Countdown,
    mut wait_tick: F,
) -> anyhow::Result<u32>
where
    W: Write,
    F: FnMut(),
{
    write!(out, "\r{}", countdown.display())?;
    out.flush()?;

    if !countdown.start() {
        writeln!(out)?;
        return Ok(0);
    }
    info!(seconds = countdown.remaining_secs(), "countdown running");

    let mut ticks = 0;
    loop {
        wait_tick();
        ticks += 1;
        let tick = countdown.tick();
        write!(out, "\r{}", countdown.display())?;
        out.flush()?;

        match tick {
            CountdownTick::Running { remaining } => {
                debug!(remaining, "tick");
            }
            CountdownTick::Expired => {
                writeln!(out)?;
                writeln!(out, "{TIMES_UP}")?;
                return Ok(ticks);
            }
            CountdownTick::Idle => {
                writeln!(out)?;
                return Ok(ticks);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_runs_to_expiry() {
        let mut out = Vec::new();
        let mut countdown = Countdown::new(1);
        let mut waits = 0;
        let ticks = run_countdown(&mut out, &mut countdown, || waits += 1).expect("run");

        assert_eq!(ticks, 60);
        assert_eq!(waits, 60);
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with("\r01:00\r00:59"));
        assert!(text.ends_with("\r00:00\n⏰ Time's up!\n"));
        assert_eq!(text.matches(TIMES_UP).count(), 1);
    }

    #[test]
    fn empty_countdown_returns_immediately() {
        let mut out = Vec::new();
        let mut countdown = Countdown::new(0);
        let ticks = run_countdown(&mut out, &mut countdown, || panic!("must not wait")).expect("run");
        assert_eq!(ticks, 0);
        assert_eq!(String::from_utf8(out).expect("utf8"), "\r00:00\n");
    }
}
