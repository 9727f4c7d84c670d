//! Repeating delay timers on the tokio clock.

use std::time::Duration;

use tokio::time::Instant;

/// Fires at most once per interval. Disarmed timers never fire and have no
/// deadline.
#[derive(Clone, Copy, Debug)]
pub struct DelayTimer {
    interval: Duration,
    started: Option<Instant>,
}

impl DelayTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            started: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn is_armed(&self) -> bool {
        self.started.is_some()
    }

    /// Starts a new interval at `now`, unless one is already running.
    pub fn arm(&mut self, now: Instant) {
        self.started.get_or_insert(now);
    }

    pub fn disarm(&mut self) {
        self.started = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.started.map(|started| started + self.interval)
    }

    /// `true` once per elapsed interval; the next interval starts at `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.started = Some(now);
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
    fn fires_once_per_interval() {
        let start = Instant::now();
        let mut timer = DelayTimer::new(Duration::from_millis(40));
        assert!(!timer.fire(start + Duration::from_secs(1)));

        timer.arm(start);
        timer.arm(start + Duration::from_millis(30));
        assert_eq!(timer.deadline(), Some(start + Duration::from_millis(40)));
        assert!(!timer.fire(start + Duration::from_millis(39)));
        assert!(timer.fire(start + Duration::from_millis(41)));
        assert!(!timer.fire(start + Duration::from_millis(60)));
        assert!(timer.fire(start + Duration::from_millis(81)));

        timer.disarm();
        assert_eq!(timer.deadline(), None);
    }
}
