use std::time::Duration;

use lampcheck_core::board::Board;
use lampcheck_core::logging::log_core_error;
use lampcheck_core::{Monitor, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::rig::SimRig;
use crate::script::{Command, PressScript};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub tick: Duration,
    pub run_for: Option<Duration>,
}

/// Why the loop stopped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StopReason {
    Quit,
    TimeUp,
}

/// Drive `monitor` on a fixed interval until a `Quit` command arrives or
/// `run_for` elapses on the rig clock.
///
/// Scripted presses are delivered one per tick, before the tick that should
/// see them, so presses due together are not merged into a chord. A closed command channel is not a reason to stop.
pub async fn run(
    monitor: &mut Monitor<SimRig>,
    script: &mut PressScript,
    commands: &mut mpsc::UnboundedReceiver<Command>,
    options: &RunOptions,
) -> Result<StopReason> {
    let mut interval = tokio::time::interval(options.tick);
    let mut commands_open = true;
    let mut last_state = monitor.state();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = monitor.board().now_ms();
                // One scripted press per tick; the rest wait for later ticks.
                if let Some(button) = script.due(now) {
                    debug!(button = button.label(), at = now, "scripted press");
                    monitor.board_mut().press(button);
                }

                let state = monitor.tick().map_err(|err| {
                    log_core_error(&err);
                    err
                })?;
                if state != last_state {
                    info!(state = state.label(), monitoring = state.is_monitoring(), "monitor");
                    last_state = state;
                }

                if let Some(limit) = options.run_for {
                    if Duration::from_millis(now) >= limit {
                        return Ok(StopReason::TimeUp);
                    }
                }
            }
            command = commands.recv(), if commands_open => match command {
                Some(Command::Press(button)) => monitor.board_mut().press(button),
                Some(Command::Quit) => return Ok(StopReason::Quit),
                None => commands_open = false,
            },
        }
    }
}
