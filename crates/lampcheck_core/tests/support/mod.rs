#![allow(dead_code)]

use std::time::Duration;

use lampcheck_core::board::{Board, Millis};
use lampcheck_core::channel::CHANNEL_COUNT;
use lampcheck_core::input::{Button, ButtonSample};
use lampcheck_core::lifecycle::DeviceState;
use lampcheck_core::{CoreError, Monitor, MonitorConfig, Result};

pub const LIT: u16 = 900;
pub const DARK: u16 = 150;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SensorMode {
    /// Reads bright while the channel light is on.
    FollowsLight,
    /// Never sees the light.
    Dark,
    /// Sensor driver fails every read.
    Broken,
}

/// In-memory rig with a manual clock.
#[derive(Debug)]
pub struct FakeBoard {
    pub now: Millis,
    pub pending: ButtonSample,
    pub lights: [bool; CHANNEL_COUNT],
    pub ever_lit: [bool; CHANNEL_COUNT],
    pub sensors: [SensorMode; CHANNEL_COUNT],
    pub sensor_reads: [usize; CHANNEL_COUNT],
    pub buzzer: bool,
    pub buzzer_writes: Vec<bool>,
    pub display_power: bool,
    pub shown: Vec<(String, String)>,
    pub clears: usize,
    pub delays: Vec<Duration>,
}

impl FakeBoard {
    pub fn new() -> Self {
        Self {
            now: 0,
            pending: ButtonSample::default(),
            lights: [false; CHANNEL_COUNT],
            ever_lit: [false; CHANNEL_COUNT],
            sensors: [SensorMode::FollowsLight; CHANNEL_COUNT],
            sensor_reads: [0; CHANNEL_COUNT],
            buzzer: false,
            buzzer_writes: Vec::new(),
            display_power: false,
            shown: Vec::new(),
            clears: 0,
            delays: Vec::new(),
        }
    }

    pub fn with_sensor(mut self, channel: usize, mode: SensorMode) -> Self {
        self.sensors[channel] = mode;
        self
    }

    pub fn has_shown(&self, first: &str) -> bool {
        self.shown.iter().any(|(line, _)| line == first)
    }

    pub fn last_shown(&self) -> Option<&(String, String)> {
        self.shown.last()
    }
}

impl Board for FakeBoard {
    fn now_ms(&self) -> Millis {
        self.now
    }

    fn read_buttons(&mut self) -> Result<ButtonSample> {
        Ok(std::mem::take(&mut self.pending))
    }

    fn read_sensor(&mut self, channel: usize) -> Result<u16> {
        self.sensor_reads[channel] += 1;
        match self.sensors[channel] {
            SensorMode::FollowsLight if self.lights[channel] => Ok(LIT),
            SensorMode::FollowsLight | SensorMode::Dark => Ok(DARK),
            SensorMode::Broken => Err(CoreError::io("light sensor", "adc timeout")),
        }
    }

    fn set_channel_output(&mut self, channel: usize, on: bool) -> Result<()> {
        self.lights[channel] = on;
        self.ever_lit[channel] |= on;
        Ok(())
    }

    fn set_buzzer(&mut self, on: bool) -> Result<()> {
        self.buzzer = on;
        self.buzzer_writes.push(on);
        Ok(())
    }

    fn set_display_power(&mut self, on: bool) -> Result<()> {
        self.display_power = on;
        Ok(())
    }

    fn display_clear(&mut self) -> Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn display_show(&mut self, first: &str, second: &str) -> Result<()> {
        self.clears += 1;
        self.shown.push((first.to_string(), second.to_string()));
        Ok(())
    }

    fn delay(&mut self, duration: Duration) {
        self.delays.push(duration);
        self.now += duration.as_millis() as u64;
    }
}

pub const STEP: Millis = 5;

pub fn monitor(board: FakeBoard) -> Monitor<FakeBoard> {
    Monitor::new(board, MonitorConfig::default()).expect("default config is valid")
}

/// Tick at `STEP` intervals until the clock reaches `until` (inclusive).
pub fn run_until(m: &mut Monitor<FakeBoard>, until: Millis) -> DeviceState {
    let mut state = m.state();
    while m.board().now <= until {
        state = m.tick().expect("tick");
        m.board_mut().now += STEP;
    }
    state
}

/// Press `button` for exactly one tick at the current time.
pub fn press(m: &mut Monitor<FakeBoard>, button: Button) -> DeviceState {
    m.board_mut().pending = ButtonSample::only(button);
    let state = m.tick().expect("tick");
    m.board_mut().now += STEP;
    state
}
