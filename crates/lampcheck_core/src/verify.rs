use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::board::{elapsed, Millis};
use crate::channel::{Channel, CHANNEL_COUNT};
use crate::error::{CoreError, Domain, ErrorKind, Payload, Result};

/// How the stabilization window is attributed to channels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum FocusPolicy {
    /// One focus shared by all channels: the window restarts whenever a
    /// different lit channel is checked. Two lights on at once never settle.
    #[default]
    Shared,
    /// Each channel keeps its own window, started when its light came on.
    PerChannel,
}

impl FromStr for FocusPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shared" => Ok(FocusPolicy::Shared),
            "per-channel" | "per_channel" | "perchannel" => Ok(FocusPolicy::PerChannel),
            _ => Err(CoreError::invalid_config(
                "focus",
                "focus policy must be `shared` or `per-channel`",
            )),
        }
    }
}

/// A lit channel whose sensor stayed dark past the stabilization window.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("Error in {name}!")]
pub struct ChannelFault {
    pub channel: usize,
    pub name: &'static str,
    pub reading: u16,
}

impl From<ChannelFault> for CoreError {
    fn from(fault: ChannelFault) -> Self {
        CoreError::warn()
            .domain(Domain::Verification)
            .kind(ErrorKind::ChannelFault)
            .msgf(format_args!("{fault}"))
            .payload(Payload::Channel {
                index: fault.channel as u8,
                reading: fault.reading,
            })
            .build()
    }
}

/// Outcome of checking one channel.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Verdict {
    /// Light off and not the focused channel: nothing to report.
    Dark,
    /// Light on, window still running.
    Settling,
    Healthy { reading: u16 },
    /// Light off and it was the focused channel.
    Low,
    Fault(ChannelFault),
}

/// Stabilization-window bookkeeping across the four channels.
#[derive(Debug, Clone)]
pub struct Verifier {
    policy: FocusPolicy,
    window: Duration,
    threshold: u16,
    focus: Option<usize>,
    focus_since: Millis,
    lit_since: [Option<Millis>; CHANNEL_COUNT],
}

impl Verifier {
    pub fn new(policy: FocusPolicy, window: Duration, threshold: u16) -> Self {
        Self {
            policy,
            window,
            threshold,
            focus: None,
            focus_since: 0,
            lit_since: [None; CHANNEL_COUNT],
        }
    }

    /// Forget every window; used when a new cycle is armed.
    pub fn reset(&mut self) {
        self.focus = None;
        self.focus_since = 0;
        self.lit_since = [None; CHANNEL_COUNT];
    }

    /// Most recently focused channel.
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Check one channel at `now`. `sample` is only called once the window has elapsed.
    pub fn check<F>(&mut self, channel: &Channel, now: Millis, sample: F) -> Result<Verdict>
    where
        F: FnOnce() -> Result<u16>,
    {
        let index = channel.index();

        if !channel.is_lit() {
            self.lit_since[index] = None;
            return Ok(if self.focus == Some(index) {
                Verdict::Low
            } else {
                Verdict::Dark
            });
        }

        let window_start = match self.policy {
            FocusPolicy::Shared => {
                if self.focus != Some(index) {
                    self.focus_since = now;
                }
                self.focus_since
            }
            FocusPolicy::PerChannel => *self.lit_since[index].get_or_insert(now),
        };
        self.focus = Some(index);

        if elapsed(now, window_start) <= self.window {
            return Ok(Verdict::Settling);
        }

        let reading = sample()?;
        debug!(channel = channel.name(), reading, "sensor sampled");

        if reading > self.threshold {
            Ok(Verdict::Healthy { reading })
        } else {
            Ok(Verdict::Fault(ChannelFault {
                channel: index,
                name: channel.name(),
                reading,
            }))
        }
    }
}
