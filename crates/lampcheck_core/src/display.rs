use std::time::Duration;

use crate::board::{elapsed, Millis};

/// Rate limit for repainting the shared two-line display.
#[derive(Debug, Clone)]
pub struct DisplayThrottle {
    interval: Duration,
    last_write: Option<Millis>,
}

impl DisplayThrottle {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_write: None,
        }
    }

    /// Claim a write slot at `now`. The first write is always allowed, later
    /// ones only once more than `interval` has passed.
    pub fn try_claim(&mut self, now: Millis) -> bool {
        let due = self
            .last_write
            .map_or(true, |last| elapsed(now, last) > self.interval);
        if due {
            self.last_write = Some(now);
        }
        due
    }
}
