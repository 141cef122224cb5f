//! Countdown timer engine.
//!
//! Pure state machine; the journal drives [`TimerState::tick`] once per
//! [`TIMER_TICK`] while the timer is running.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Length of a fresh countdown: fifteen minutes.
pub const DEFAULT_TIMER_SECONDS: u32 = 15 * 60;

/// Interval between ticks.
pub const TIMER_TICK: Duration = Duration::from_secs(1);

/// Countdown state, persisted as part of the settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerState {
    #[serde(rename = "timerSeconds")]
    pub remaining_seconds: u32,
    #[serde(rename = "timerRunning")]
    pub is_running: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            remaining_seconds: DEFAULT_TIMER_SECONDS,
            is_running: false,
        }
    }
}

impl TimerState {
    /// Start or pause. An expired timer restarts from the full duration.
    pub fn toggle(&mut self) {
        if self.remaining_seconds == 0 {
            self.remaining_seconds = DEFAULT_TIMER_SECONDS;
            self.is_running = true;
        } else {
            self.is_running = !self.is_running;
        }
    }

    /// Back to the full duration, paused.
    pub fn reset(&mut self) {
        self.remaining_seconds = DEFAULT_TIMER_SECONDS;
        self.is_running = false;
    }

    /// Advance one second. Returns `true` when the state changed.
    ///
    /// Ticks while paused are ignored. The countdown stops at zero and does not
    /// repeat.
    pub fn tick(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        if self.remaining_seconds <= 1 {
            self.remaining_seconds = 0;
            self.is_running = false;
        } else {
            self.remaining_seconds -= 1;
        }
        true
    }

    /// `MM:SS` label for the remaining time.
    #[must_use]
    pub fn label(&self) -> String {
        crate::util::format_clock(u64::from(self.remaining_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_at_zero_restarts_full_countdown() {
        let mut timer = TimerState {
            remaining_seconds: 0,
            is_running: false,
        };
        timer.toggle();
        assert_eq!(timer.remaining_seconds, 900);
        assert!(timer.is_running);
    }

    #[test]
    fn toggle_flips_running_otherwise() {
        let mut timer = TimerState::default();
        timer.toggle();
        assert!(timer.is_running);
        timer.toggle();
        assert!(!timer.is_running);
        assert_eq!(timer.remaining_seconds, 900);
    }

    #[test]
    fn full_run_down_stops_at_zero() {
        let mut timer = TimerState {
            remaining_seconds: 0,
            is_running: false,
        };
        timer.toggle();

        for _ in 0..899 {
            assert!(timer.tick());
        }
        assert_eq!(timer.remaining_seconds, 1);
        assert!(timer.is_running);

        assert!(timer.tick());
        assert_eq!(timer.remaining_seconds, 0);
        assert!(!timer.is_running);

        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds, 0);
    }

    #[test]
    fn reset_is_unconditional() {
        let mut timer = TimerState {
            remaining_seconds: 42,
            is_running: true,
        };
        timer.reset();
        assert_eq!(timer, TimerState::default());
    }

    #[test]
    fn paused_tick_is_ignored() {
        let mut timer = TimerState {
            remaining_seconds: 10,
            is_running: false,
        };
        assert!(!timer.tick());
        assert_eq!(timer.remaining_seconds, 10);
    }

    #[test]
    fn label_formats_minutes() {
        let timer = TimerState {
            remaining_seconds: 61,
            is_running: false,
        };
        assert_eq!(timer.label(), "01:01");
    }
}
