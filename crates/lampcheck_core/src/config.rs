use std::time::Duration;

use crate::error::{CoreError, Result};
use crate::verify::FocusPolicy;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);
pub const DEFAULT_STABILIZATION: Duration = Duration::from_millis(25);
pub const DEFAULT_CYCLE_DURATION: Duration = Duration::from_millis(16_000);
pub const DEFAULT_SLEEP_DELAY: Duration = Duration::from_millis(2_500);
pub const DEFAULT_PRINT_THROTTLE: Duration = Duration::from_millis(150);
pub const DEFAULT_SETTLE_DELAY: Duration = DEFAULT_PRINT_THROTTLE;
pub const DEFAULT_PULSE_ON: Duration = Duration::from_millis(2_000);
pub const DEFAULT_PULSE_STAGGER: Duration = Duration::from_millis(4_000);
pub const DEFAULT_LUMINOSITY_THRESHOLD: u16 = 600;
pub const DEFAULT_DARKNESS_THRESHOLD: u16 = 360;

/// Thresholds and delays for one monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Minimum spacing between accepted button events.
    pub debounce: Duration,
    /// How long a channel must hold focus before its sensor is trusted.
    pub stabilization: Duration,
    /// Time after arming before `Continuing` completes into `Finished`.
    pub cycle_duration: Duration,
    /// Time in `Sleeping` before the display is powered down.
    pub sleep_delay: Duration,
    /// Minimum spacing between display repaints.
    pub print_throttle: Duration,
    /// Blocking pause between clearing the display and cutting its power.
    pub settle_delay: Duration,
    /// How long each light stays on during a cycle.
    pub pulse_on: Duration,
    /// Offset between consecutive channels' pulses.
    pub pulse_stagger: Duration,
    /// A reading strictly above this counts as "light seen".
    pub luminosity_threshold: u16,
    /// Carried for calibration notes; no logic reads it.
    pub darkness_threshold: u16,
    pub focus: FocusPolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            stabilization: DEFAULT_STABILIZATION,
            cycle_duration: DEFAULT_CYCLE_DURATION,
            sleep_delay: DEFAULT_SLEEP_DELAY,
            print_throttle: DEFAULT_PRINT_THROTTLE,
            settle_delay: DEFAULT_SETTLE_DELAY,
            pulse_on: DEFAULT_PULSE_ON,
            pulse_stagger: DEFAULT_PULSE_STAGGER,
            luminosity_threshold: DEFAULT_LUMINOSITY_THRESHOLD,
            darkness_threshold: DEFAULT_DARKNESS_THRESHOLD,
            focus: FocusPolicy::Shared,
        }
    }
}

impl MonitorConfig {
    pub fn with_focus(mut self, focus: FocusPolicy) -> Self {
        self.focus = focus;
        self
    }

    /// Reject configurations under which no channel could ever pass.
    pub fn validate(&self) -> Result<()> {
        if self.cycle_duration.is_zero() {
            return Err(CoreError::invalid_config(
                "cycle_duration",
                "cycle duration must be non-zero",
            ));
        }
        if self.stabilization >= self.pulse_on {
            return Err(CoreError::invalid_config(
                "stabilization",
                "stabilization window must be shorter than the light pulse",
            ));
        }
        if self.luminosity_threshold == 0 {
            return Err(CoreError::invalid_config(
                "luminosity_threshold",
                "luminosity threshold must be above zero",
            ));
        }
        Ok(())
    }
}
