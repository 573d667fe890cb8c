use std::time::Duration;

use crate::error::Result;
use crate::input::ButtonSample;

/// Milliseconds since boot.
pub type Millis = u64;

/// Time between two timestamps, zero if the clock appears to run backwards.
pub fn elapsed(now: Millis, since: Millis) -> Duration {
    Duration::from_millis(now.saturating_sub(since))
}

/// Everything the monitor needs from the rig.
///
/// Implementors own the pins and drivers. Channel indices are `0..CHANNEL_COUNT`.
/// `delay` is the only blocking call and is used for the display power-down settle.
pub trait Board {
    fn now_ms(&self) -> Millis;

    fn read_buttons(&mut self) -> Result<ButtonSample>;

    /// Raw brightness reading; higher is brighter.
    fn read_sensor(&mut self, channel: usize) -> Result<u16>;

    fn set_channel_output(&mut self, channel: usize, on: bool) -> Result<()>;

    fn set_buzzer(&mut self, on: bool) -> Result<()>;

    fn set_display_power(&mut self, on: bool) -> Result<()>;

    fn display_clear(&mut self) -> Result<()>;

    /// Clear the display and write both lines.
    fn display_show(&mut self, first: &str, second: &str) -> Result<()>;

    fn delay(&mut self, duration: Duration);
}
