//! Countdown and stopwatch state machines.
//!
//! Neither owns a clock or a ticker. The caller drives them with a repeating
//! tick (one second by default) and, for the stopwatch, the current instant.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info};

pub const DEFAULT_COUNTDOWN_MINUTES: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Not running; the tick should not have fired.
    Idle,
    Running { remaining: u32 },
    /// Reached zero on this tick. Reported once per run.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    duration_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_MINUTES)
    }
}

impl Countdown {
    pub fn new(minutes: u32) -> Self {
        let duration_secs = minutes.saturating_mul(60);
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            running: false,
        }
    }

    /// Configures a new duration. Any run in progress stops.
    pub fn set(&mut self, minutes: u32) {
        *self = Self::new(minutes);
        debug!(minutes, "countdown set");
    }

    /// Returns whether the countdown is now running. A countdown with nothing
    /// left stays stopped.
    pub fn start(&mut self) -> bool {
        if self.remaining_secs == 0 {
            debug!("countdown has no time left; not starting");
            self.running = false;
            return false;
        }
        self.running = true;
        debug!(remaining = self.remaining_secs, "countdown started");
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Restores the configured duration and stops.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = self.duration_secs;
    }

    pub fn tick(&mut self) -> CountdownTick {
        if !self.running {
            return CountdownTick::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            info!("countdown expired");
            return CountdownTick::Expired;
        }
        CountdownTick::Running {
            remaining: self.remaining_secs,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn display(&self) -> String {
        format_mm_ss(u64::from(self.remaining_secs))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopwatch {
    accumulated: TimeDelta,
    started_at: Option<DateTime<Utc>>,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            accumulated: TimeDelta::zero(),
            started_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Starting a running stopwatch does nothing and returns `false`.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_running() {
            return false;
        }
        self.started_at = Some(now);
        debug!(accumulated_ms = self.accumulated.num_milliseconds(), "stopwatch started");
        true
    }

    pub fn stop(&mut self, now: DateTime<Utc>) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += non_negative(now - started_at);
            debug!(accumulated_ms = self.accumulated.num_milliseconds(), "stopwatch stopped");
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        match self.started_at {
            Some(started_at) => self.accumulated + non_negative(now - started_at),
            None => self.accumulated,
        }
    }

    pub fn display(&self, now: DateTime<Utc>) -> String {
        let secs = self.elapsed(now).num_seconds().max(0);
        format_hh_mm_ss(secs.unsigned_abs())
    }
}

fn non_negative(delta: TimeDelta) -> TimeDelta {
    delta.max(TimeDelta::zero())
}

pub fn format_mm_ss(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn format_hh_mm_ss(total_secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).single().expect("valid timestamp")
    }

    #[test]
    fn one_minute_expires_on_tick_sixty_exactly_once() {
        let mut countdown = Countdown::default();
        countdown.set(1);
        assert!(countdown.start());

        let mut expired_at = vec![];
        for tick in 1..=120 {
            if countdown.tick() == CountdownTick::Expired {
                expired_at.push(tick);
            }
        }
        assert_eq!(expired_at, vec![60]);
        assert!(!countdown.is_running());
        assert_eq!(countdown.display(), "00:00");
    }

    #[test]
    fn stop_keeps_remaining_and_reset_restores() {
        let mut countdown = Countdown::new(2);
        countdown.start();
        for _ in 0..5 {
            countdown.tick();
        }
        countdown.stop();
        assert_eq!(countdown.tick(), CountdownTick::Idle);
        assert_eq!(countdown.display(), "01:55");

        countdown.start();
        assert_eq!(countdown.tick(), CountdownTick::Running { remaining: 114 });

        countdown.reset();
        assert!(!countdown.is_running());
        assert_eq!(countdown.remaining_secs(), 120);
    }

    #[test]
    fn set_stops_a_running_countdown() {
        let mut countdown = Countdown::new(5);
        countdown.start();
        countdown.set(10);
        assert!(!countdown.is_running());
        assert_eq!(countdown.display(), "10:00");
    }

    #[test]
    fn restarting_does_not_double_tick() {
        let mut countdown = Countdown::new(1);
        countdown.start();
        countdown.start();
        assert_eq!(countdown.tick(), CountdownTick::Running { remaining: 59 });
    }

    #[test]
    fn zero_length_countdown_never_runs() {
        let mut countdown = Countdown::new(0);
        assert!(!countdown.start());
        assert_eq!(countdown.tick(), CountdownTick::Idle);
    }

    #[test]
    fn stopwatch_accumulates_across_restarts() {
        let mut watch = Stopwatch::new();
        assert!(watch.start(t0()));
        assert!(!watch.start(t0() + TimeDelta::seconds(3)));

        let after_five = t0() + TimeDelta::seconds(5);
        assert_eq!(watch.display(after_five), "00:00:05");
        watch.stop(after_five);
        assert_eq!(watch.elapsed(t0() + TimeDelta::seconds(100)), TimeDelta::seconds(5));

        let resume = t0() + TimeDelta::seconds(100);
        watch.start(resume);
        assert_eq!(
            watch.elapsed(resume + TimeDelta::seconds(7)),
            TimeDelta::seconds(12)
        );

        watch.reset();
        assert!(!watch.is_running());
        assert_eq!(watch.display(resume), "00:00:00");
    }

    #[test]
    fn stopwatch_ignores_backwards_clock() {
        let mut watch = Stopwatch::new();
        watch.start(t0());
        assert_eq!(watch.elapsed(t0() - TimeDelta::seconds(10)), TimeDelta::zero());
    }

    #[test]
    fn clock_formats() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(61), "01:01");
        assert_eq!(format_mm_ss(90 * 60), "90:00");
        assert_eq!(format_hh_mm_ss(3_725), "01:02:05");
    }
}
