use std::time::Duration;

use crate::blink::{BlinkPattern, Blinker};
use crate::board::Millis;

pub const CHANNEL_COUNT: usize = 4;

pub const CHANNEL_NAMES: [&str; CHANNEL_COUNT] = ["LED1", "LED2", "LED3", "LED4"];

/// One indicator light and the sensor pointed at it.
///
/// The light output and the sensor share the channel index on the board.
#[derive(Debug, Clone)]
pub struct Channel {
    index: usize,
    name: &'static str,
    blinker: Blinker,
}

impl Channel {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            name: CHANNEL_NAMES[index],
            blinker: Blinker::new(),
        }
    }

    pub fn all() -> [Channel; CHANNEL_COUNT] {
        std::array::from_fn(Channel::new)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Light currently in its on phase.
    pub fn is_lit(&self) -> bool {
        self.blinker.is_on()
    }

    pub fn blinker(&self) -> &Blinker {
        &self.blinker
    }

    pub fn blinker_mut(&mut self) -> &mut Blinker {
        &mut self.blinker
    }
}

/// The staggered sequence: channel `i` pulses `on` once, `i * stagger` after arming.
pub fn staggered_pattern(index: usize, on: Duration, stagger: Duration) -> BlinkPattern {
    BlinkPattern::pulse(on, stagger * index as u32)
}

/// Arm every channel with its staggered pulse.
pub fn arm_all(channels: &mut [Channel], on: Duration, stagger: Duration, now: Millis) {
    for channel in channels {
        let pattern = staggered_pattern(channel.index, on, stagger);
        channel.blinker.arm(pattern, now);
    }
}
