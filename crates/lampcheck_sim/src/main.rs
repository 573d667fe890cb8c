use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use lampcheck_core::Monitor;
use lampcheck_sim::config::SimConfig;
use lampcheck_sim::rig::{SimClock, SimRig};
use lampcheck_sim::runner::{self, StopReason};
use lampcheck_sim::script::Command;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = SimConfig::from_args();
    info!(
        tick_ms = config.tick.as_millis() as u64,
        fault = ?config.fault,
        focus = ?config.focus,
        scripted = config.script.len(),
        "starting lampcheck_sim"
    );

    let rig = SimRig::new(SimClock::wall()).with_fault(config.fault);
    let mut monitor =
        Monitor::new(rig, config.monitor_config()).context("failed to start monitor")?;

    let (tx, mut commands) = mpsc::unbounded_channel();

    let stdin_tx = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match Command::parse(&line) {
                    Some(command) => {
                        if stdin_tx.send(command).is_err() {
                            break;
                        }
                    }
                    None => warn!("unknown command {:?} (start, resume, stop, quit)", line.trim()),
                },
                Ok(None) => break,
                Err(err) => {
                    warn!("stdin closed: {err}");
                    break;
                }
            }
        }
    });

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = tx.send(Command::Quit);
        }
    });

    let mut script = config.script.clone();
    let reason = runner::run(&mut monitor, &mut script, &mut commands, &config.run_options())
        .await
        .context("monitor stopped on a board error")?;

    match reason {
        StopReason::Quit => info!(state = monitor.state().label(), "shutdown"),
        StopReason::TimeUp => info!(state = monitor.state().label(), "run time elapsed"),
    }
    Ok(())
}
