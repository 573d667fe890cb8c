use tracing::{debug, info, trace};

use crate::board::{elapsed, Board, Millis};
use crate::channel::{arm_all, Channel, CHANNEL_COUNT};
use crate::config::MonitorConfig;
use crate::display::DisplayThrottle;
use crate::error::{CoreError, Result};
use crate::input::Debouncer;
use crate::lifecycle::{available_events, resolve, DeviceState, TransitionEvent};
use crate::logging::log_core_error;
use crate::verify::{Verdict, Verifier};

const PROMPT_START: &str = "Press start...";

/// A completed state change.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TransitionRecord {
    pub from: DeviceState,
    pub to: DeviceState,
    pub at: Millis,
}

/// Owned context of the light rig: lifecycle state, channel schedules,
/// verification windows and the board they drive.
///
/// Call [`Monitor::tick`] from the control loop. Each tick reads the buttons,
/// applies at most one operator transition, then runs the handler of the
/// current state once.
pub struct Monitor<B: Board> {
    board: B,
    config: MonitorConfig,
    state: DeviceState,
    state_since: Millis,
    cycle_started: Millis,
    debounce: Debouncer,
    throttle: DisplayThrottle,
    verifier: Verifier,
    channels: [Channel; CHANNEL_COUNT],
    error_message: String,
    display_asleep: bool,
    last_transition: Option<TransitionRecord>,
}

impl<B: Board> Monitor<B> {
    /// Boot into `Starting`.
    pub fn new(board: B, config: MonitorConfig) -> Result<Self> {
        config.validate()?;

        let now = board.now_ms();
        info!(focus = ?config.focus, "monitor booted into Starting");

        Ok(Self {
            verifier: Verifier::new(config.focus, config.stabilization, config.luminosity_threshold),
            debounce: Debouncer::new(config.debounce),
            throttle: DisplayThrottle::new(config.print_throttle),
            board,
            config,
            state: DeviceState::Starting,
            state_since: now,
            cycle_started: now,
            channels: Channel::all(),
            error_message: String::new(),
            display_asleep: false,
            last_transition: None,
        })
    }

    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Timestamp of the last transition (boot time before the first one).
    pub fn state_since(&self) -> Millis {
        self.state_since
    }

    pub fn last_transition(&self) -> Option<TransitionRecord> {
        self.last_transition
    }

    /// Message shown while in `Error`, e.g. `Error in LED2!`. Empty before the first fault.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn channels(&self) -> &[Channel; CHANNEL_COUNT] {
        &self.channels
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn into_board(self) -> B {
        self.board
    }

    /// One control-loop iteration. Returns the state after the tick.
    pub fn tick(&mut self) -> Result<DeviceState> {
        let now = self.board.now_ms();

        self.read_input(now)?;

        match self.state {
            DeviceState::Starting => self.on_starting(now)?,
            DeviceState::Continuing => self.on_continuing(now)?,
            DeviceState::Error => self.on_error(now)?,
            DeviceState::Finished => self.print("Finished!", PROMPT_START, now)?,
            DeviceState::Paused => self.print("Paused!", "Press play...", now)?,
            DeviceState::Restarting => self.on_restarting(now)?,
            DeviceState::Sleeping => self.on_sleeping(now)?,
            DeviceState::Stopped => self.on_stopped(now)?,
        }

        Ok(self.state)
    }

    /// The single entry point for state changes.
    fn change_state(&mut self, next: DeviceState, now: Millis) -> Result<()> {
        if self.state == DeviceState::Error && next != DeviceState::Error {
            self.board.set_buzzer(false)?;
        }
        if next == DeviceState::Sleeping {
            self.display_asleep = false;
        }

        info!(from = self.state.label(), to = next.label(), at = now, "state change");
        self.last_transition = Some(TransitionRecord {
            from: self.state,
            to: next,
            at: now,
        });
        self.state = next;
        self.state_since = now;
        Ok(())
    }

    fn read_input(&mut self, now: Millis) -> Result<()> {
        let Some(button) = self.board.read_buttons()?.pressed() else {
            return Ok(());
        };
        if !self.debounce.accept(now) {
            return Ok(());
        }

        let event = resolve(self.state, button);
        debug!(
            button = button.label(),
            state = self.state.label(),
            event = event.map(TransitionEvent::label),
            available = ?available_events(self.state),
            "button accepted"
        );
        match event {
            Some(event) => self.change_state(event.goal(), now),
            None => Ok(()),
        }
    }

    /// Repaint the display unless the throttle says it was written too recently.
    fn print(&mut self, first: &str, second: &str, now: Millis) -> Result<()> {
        if self.throttle.try_claim(now) {
            trace!(first, second, "display repaint");
            self.board.display_show(first, second)?;
        }
        Ok(())
    }

    fn arm_cycle(&mut self, now: Millis) {
        arm_all(
            &mut self.channels,
            self.config.pulse_on,
            self.config.pulse_stagger,
            now,
        );
        self.verifier.reset();
        self.cycle_started = now;
    }

    fn lights_off(&mut self) -> Result<()> {
        for channel in &mut self.channels {
            channel.blinker_mut().disable();
            self.board.set_channel_output(channel.index(), false)?;
        }
        Ok(())
    }

    fn on_starting(&mut self, now: Millis) -> Result<()> {
        self.arm_cycle(now);
        self.board.set_display_power(true)?;
        self.print("We are ready,", "press start...", now)
    }

    fn on_continuing(&mut self, now: Millis) -> Result<()> {
        for channel in &mut self.channels {
            if let Some(level) = channel.blinker_mut().update(now) {
                self.board.set_channel_output(channel.index(), level)?;
            }
        }

        for index in 0..CHANNEL_COUNT {
            let board = &mut self.board;
            let channel = &self.channels[index];
            let verdict = self
                .verifier
                .check(channel, now, || board.read_sensor(index))?;
            let name = channel.name();

            match verdict {
                Verdict::Healthy { .. } => self.print(&format!("{name} is high!"), "", now)?,
                Verdict::Low => self.print(&format!("{name} is low!"), "", now)?,
                Verdict::Fault(fault) => {
                    self.error_message = fault.to_string();
                    log_core_error(&CoreError::from(fault));
                    return self.change_state(DeviceState::Error, now);
                }
                Verdict::Dark | Verdict::Settling => {}
            }
        }

        if elapsed(now, self.cycle_started) > self.config.cycle_duration {
            self.change_state(DeviceState::Finished, now)?;
        }
        Ok(())
    }

    fn on_error(&mut self, now: Millis) -> Result<()> {
        let message = self.error_message.clone();
        self.print(&message, PROMPT_START, now)?;
        self.lights_off()?;
        self.board.set_buzzer(true)
    }

    fn on_restarting(&mut self, now: Millis) -> Result<()> {
        self.arm_cycle(now);
        self.change_state(DeviceState::Continuing, now)
    }

    fn on_sleeping(&mut self, now: Millis) -> Result<()> {
        if self.display_asleep {
            return Ok(());
        }

        self.print("Falling asleep!", "   zzz...", now)?;

        if elapsed(now, self.state_since) > self.config.sleep_delay {
            self.board.display_clear()?;
            self.board.delay(self.config.settle_delay);
            self.board.set_display_power(false)?;
            self.display_asleep = true;
            info!("display powered down");
        }
        Ok(())
    }

    fn on_stopped(&mut self, now: Millis) -> Result<()> {
        self.print("Stopped!", PROMPT_START, now)?;
        self.lights_off()
    }
}
