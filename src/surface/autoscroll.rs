//! Repeating auto-scroll timer driven by the host's tick.

use std::time::Duration;

/// Fires at a fixed interval while running.
///
/// There is no hidden clock: the host advances time with [`ScrollTimer::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTimer {
    interval: Duration,
    elapsed: Duration,
    direction: (i32, i32),
    running: bool,
}

impl ScrollTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            direction: (0, 0),
            running: false,
        }
    }

    /// Start scrolling towards `direction`. Restarts the interval if already running.
    pub fn start(&mut self, direction: (i32, i32)) {
        log::trace!("ScrollTimer: start {:?}", direction);
        self.direction = (direction.0.signum(), direction.1.signum());
        self.elapsed = Duration::ZERO;
        self.running = true;
    }

    /// Stop the timer. No-op when already stopped.
    pub fn stop(&mut self) {
        if self.running {
            log::trace!("ScrollTimer: stop");
        }
        self.running = false;
        self.elapsed = Duration::ZERO;
        self.direction = (0, 0);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn direction(&self) -> (i32, i32) {
        self.direction
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Advance time by `dt`. Returns how many times the timer fired.
    pub fn tick(&mut self, dt: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        let elapsed = self.elapsed.saturating_add(dt).as_nanos();
        let interval = self.interval.as_nanos();
        self.elapsed = Duration::from_nanos(u64::try_from(elapsed % interval).unwrap_or(u64::MAX));
        u32::try_from(elapsed / interval).unwrap_or(u32::MAX)
    }
}
