use std::env;
use std::time::Duration;

use lampcheck_core::verify::FocusPolicy;
use lampcheck_core::MonitorConfig;
use tracing::warn;

use crate::runner::RunOptions;
use crate::script::PressScript;

pub const DEFAULT_TICK: Duration = Duration::from_millis(10);

pub struct SimConfig {
    pub tick: Duration,
    /// 0-based channel whose sensor never sees its light.
    pub fault: Option<usize>,
    pub focus: FocusPolicy,
    pub script: PressScript,
    pub run_for: Option<Duration>,
}

impl SimConfig {
    pub fn from_args() -> Self {
        Self::from_args_iter(env::args())
    }

    pub fn from_args_iter<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tick = env::var("LAMPCHECK_TICK_MS")
            .ok()
            .and_then(|v| parse_millis("LAMPCHECK_TICK_MS", &v))
            .unwrap_or(DEFAULT_TICK);
        let mut fault = env::var("LAMPCHECK_FAULT")
            .ok()
            .and_then(|v| parse_channel("LAMPCHECK_FAULT", &v));
        let mut focus = env::var("LAMPCHECK_FOCUS")
            .ok()
            .and_then(|v| parse_focus("LAMPCHECK_FOCUS", &v))
            .unwrap_or_default();
        let mut script = PressScript::default();
        let mut run_for = None;

        let mut args = iter.into_iter();
        let _ = args.next();
        while let Some(arg) = args.next() {
            let arg = arg.as_ref();
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
                _ => (arg, None),
            };
            let mut value = || inline.clone().or_else(|| args.next().map(|v| v.as_ref().to_string()));

            match flag {
                "-h" | "--help" => {
                    print_usage();
                    std::process::exit(0);
                }
                "--tick-ms" => {
                    if let Some(v) = value().and_then(|v| parse_millis(flag, &v)) {
                        tick = v;
                    }
                }
                "--fault" => {
                    if let Some(v) = value() {
                        fault = parse_channel(flag, &v);
                    }
                }
                "--focus" => {
                    if let Some(v) = value().and_then(|v| parse_focus(flag, &v)) {
                        focus = v;
                    }
                }
                "--script" => {
                    if let Some(v) = value() {
                        match v.parse::<PressScript>() {
                            Ok(parsed) => script = parsed,
                            Err(err) => warn!("ignoring --script: {err}"),
                        }
                    }
                }
                "--run-for" => {
                    run_for = value().and_then(|v| parse_millis(flag, &v));
                }
                _ => warn!("ignoring unknown argument {arg}"),
            }
        }

        Self {
            tick,
            fault,
            focus,
            script,
            run_for,
        }
    }

    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig::default().with_focus(self.focus)
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            tick: self.tick,
            run_for: self.run_for,
        }
    }
}

fn print_usage() {
    println!(
        "lampcheck_sim [--tick-ms <ms>] [--fault <1-4>] [--focus shared|per-channel] [--script start@500,stop@20000] [--run-for <ms>]"
    );
}

fn parse_millis(source: &str, value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
        _ => {
            warn!("{source}: expected a positive number of milliseconds, got {value:?}");
            None
        }
    }
}

/// Channels are numbered 1-4 on the rig; stored 0-based.
fn parse_channel(source: &str, value: &str) -> Option<usize> {
    match value.trim().parse::<usize>() {
        Ok(n @ 1..=4) => Some(n - 1),
        _ => {
            warn!("{source}: expected a channel 1-4, got {value:?}");
            None
        }
    }
}

fn parse_focus(source: &str, value: &str) -> Option<FocusPolicy> {
    value
        .parse::<FocusPolicy>()
        .map_err(|err| warn!("{source}: {err}"))
        .ok()
}
