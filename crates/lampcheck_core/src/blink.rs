use std::time::Duration;

use crate::board::{elapsed, Millis};

/// A timed on/off pattern: wait `delay`, then alternate `high` on and `low`
/// off, for `pulses` periods (forever when `None`).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BlinkPattern {
    pub high: Duration,
    pub low: Duration,
    pub delay: Duration,
    pub pulses: Option<u32>,
}

impl BlinkPattern {
    /// One pulse of `on` starting `delay` after arming.
    pub const fn pulse(on: Duration, delay: Duration) -> Self {
        Self {
            high: on,
            low: on,
            delay,
            pulses: Some(1),
        }
    }

    pub const fn repeating(high: Duration, low: Duration, delay: Duration) -> Self {
        Self {
            high,
            low,
            delay,
            pulses: None,
        }
    }

    /// Phase of the pattern `since_armed` after it was armed.
    pub fn is_on_at(&self, since_armed: Duration) -> bool {
        let Some(t) = since_armed.checked_sub(self.delay) else {
            return false;
        };
        let period = (self.high + self.low).as_millis();
        if period == 0 {
            return false;
        }
        let t = t.as_millis();
        if let Some(pulses) = self.pulses {
            if t / period >= u128::from(pulses) {
                return false;
            }
        }
        t % period < self.high.as_millis()
    }
}

/// Drives one output from a [`BlinkPattern`].
///
/// `level` mirrors what was last written to the pin; `update` reports a new
/// level only when the pattern flips it.
#[derive(Debug, Clone, Default)]
pub struct Blinker {
    pattern: Option<BlinkPattern>,
    armed_at: Millis,
    level: bool,
}

impl Blinker {
    pub const fn new() -> Self {
        Self {
            pattern: None,
            armed_at: 0,
            level: false,
        }
    }

    /// Start `pattern` from `now`. The current output level is kept until the next `update`.
    pub fn arm(&mut self, pattern: BlinkPattern, now: Millis) {
        self.pattern = Some(pattern);
        self.armed_at = now;
    }

    /// Stop the pattern and hold the output low.
    pub fn disable(&mut self) {
        self.pattern = None;
        self.level = false;
    }

    /// Advance to `now`. Returns the new level if it changed.
    pub fn update(&mut self, now: Millis) -> Option<bool> {
        let next = self
            .pattern
            .map(|p| p.is_on_at(elapsed(now, self.armed_at)))
            .unwrap_or(false);
        if next == self.level {
            return None;
        }
        self.level = next;
        Some(next)
    }

    pub fn is_on(&self) -> bool {
        self.level
    }

    pub fn pattern(&self) -> Option<&BlinkPattern> {
        self.pattern.as_ref()
    }
}
