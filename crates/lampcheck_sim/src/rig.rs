use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lampcheck_core::board::{Board, Millis};
use lampcheck_core::channel::{CHANNEL_COUNT, CHANNEL_NAMES};
use lampcheck_core::error::{CoreError, Result};
use lampcheck_core::input::{Button, ButtonSample};
use tracing::{info, warn};

/// Reading of a sensor looking at a lit channel.
pub const LIT_READING: u16 = 900;
/// Reading of a sensor in ambient light.
pub const DARK_READING: u16 = 200;

/// Time source for the rig.
///
/// `Wall` follows tokio's clock (so paused-time tests still advance it);
/// `Manual` only moves when told to. Both can be pushed forward with
/// [`SimClock::advance`], which is how blocking board delays are simulated.
#[derive(Debug, Clone)]
pub enum SimClock {
    Wall {
        origin: tokio::time::Instant,
        skew: Arc<AtomicU64>,
    },
    Manual(Arc<AtomicU64>),
}

impl SimClock {
    pub fn wall() -> Self {
        SimClock::Wall {
            origin: tokio::time::Instant::now(),
            skew: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn manual() -> Self {
        SimClock::Manual(Arc::new(AtomicU64::new(0)))
    }

    pub fn now_ms(&self) -> Millis {
        match self {
            SimClock::Wall { origin, skew } => {
                origin.elapsed().as_millis() as Millis + skew.load(Ordering::Acquire)
            }
            SimClock::Manual(ms) => ms.load(Ordering::Acquire),
        }
    }

    pub fn advance(&self, by: Duration) {
        let ms = match self {
            SimClock::Wall { skew, .. } => skew,
            SimClock::Manual(ms) => ms,
        };
        ms.fetch_add(by.as_millis() as u64, Ordering::AcqRel);
    }
}

/// Virtual light rig implementing [`Board`].
#[derive(Debug)]
pub struct SimRig {
    clock: SimClock,
    pending: ButtonSample,
    lights: [bool; CHANNEL_COUNT],
    fault: Option<usize>,
    buzzer: bool,
    display_power: bool,
    lines: (String, String),
    repaints: usize,
}

impl SimRig {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            pending: ButtonSample::default(),
            lights: [false; CHANNEL_COUNT],
            fault: None,
            buzzer: false,
            display_power: false,
            lines: (String::new(), String::new()),
            repaints: 0,
        }
    }

    /// Make one channel's sensor blind (0-based index).
    pub fn with_fault(mut self, channel: Option<usize>) -> Self {
        self.fault = channel.filter(|c| *c < CHANNEL_COUNT);
        self
    }

    /// Hold `button` down until the next sample.
    pub fn press(&mut self, button: Button) {
        let before = self.pending;
        self.pending.set(button);
        if before != ButtonSample::default() && before != self.pending {
            warn!(target: "rig", button = button.label(), "chord formed, the next sample will be ignored");
        }
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn lights(&self) -> [bool; CHANNEL_COUNT] {
        self.lights
    }

    pub fn buzzer(&self) -> bool {
        self.buzzer
    }

    pub fn display_power(&self) -> bool {
        self.display_power
    }

    pub fn lines(&self) -> (&str, &str) {
        (&self.lines.0, &self.lines.1)
    }

    pub fn repaints(&self) -> usize {
        self.repaints
    }

    fn check_channel(channel: usize) -> Result<()> {
        if channel < CHANNEL_COUNT {
            Ok(())
        } else {
            Err(CoreError::unknown_channel(channel))
        }
    }
}

impl Board for SimRig {
    fn now_ms(&self) -> Millis {
        self.clock.now_ms()
    }

    fn read_buttons(&mut self) -> Result<ButtonSample> {
        Ok(std::mem::take(&mut self.pending))
    }

    fn read_sensor(&mut self, channel: usize) -> Result<u16> {
        Self::check_channel(channel)?;
        if self.fault == Some(channel) || !self.lights[channel] {
            Ok(DARK_READING)
        } else {
            Ok(LIT_READING)
        }
    }

    fn set_channel_output(&mut self, channel: usize, on: bool) -> Result<()> {
        Self::check_channel(channel)?;
        if self.lights[channel] != on {
            info!(target: "rig", light = CHANNEL_NAMES[channel], on, "light");
        }
        self.lights[channel] = on;
        Ok(())
    }

    fn set_buzzer(&mut self, on: bool) -> Result<()> {
        if self.buzzer != on {
            info!(target: "rig", on, "buzzer");
        }
        self.buzzer = on;
        Ok(())
    }

    fn set_display_power(&mut self, on: bool) -> Result<()> {
        if self.display_power != on {
            info!(target: "rig", on, "display power");
        }
        self.display_power = on;
        Ok(())
    }

    fn display_clear(&mut self) -> Result<()> {
        self.lines = (String::new(), String::new());
        Ok(())
    }

    fn display_show(&mut self, first: &str, second: &str) -> Result<()> {
        self.repaints += 1;
        if self.lines.0 != first || self.lines.1 != second {
            info!(target: "display", "[{first:<16}] [{second:<16}]");
        }
        self.lines = (first.to_string(), second.to_string());
        Ok(())
    }

    /// Jumps the rig clock instead of sleeping, so the tokio worker driving
    /// the monitor is never blocked.
    fn delay(&mut self, duration: Duration) {
        self.clock.advance(duration);
    }
}
