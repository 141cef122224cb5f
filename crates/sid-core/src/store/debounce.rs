//! Single-pending deadline timers.

use std::time::{Duration, Instant};

/// A timer with at most one pending deadline.
///
/// Arming replaces whatever was pending, so only the latest scheduled firing
/// can ever happen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeadlineTimer {
    deadline: Option<Instant>,
}

impl DeadlineTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Schedule a firing `delay` after `now`, superseding any pending one.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarm and return `true` if the deadline has passed.
    pub fn take_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearming_supersedes_pending_deadline() {
        let start = Instant::now();
        let mut timer = DeadlineTimer::new();

        timer.arm(start, Duration::from_millis(350));
        timer.arm(start + Duration::from_millis(200), Duration::from_millis(350));

        assert!(!timer.take_if_due(start + Duration::from_millis(350)));
        assert!(timer.take_if_due(start + Duration::from_millis(550)));
        assert!(!timer.is_armed());
        assert!(!timer.take_if_due(start + Duration::from_millis(900)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let start = Instant::now();
        let mut timer = DeadlineTimer::new();
        timer.arm(start, Duration::from_millis(10));
        timer.cancel();
        assert_eq!(timer.deadline(), None);
        assert!(!timer.take_if_due(start + Duration::from_secs(1)));
    }
}
