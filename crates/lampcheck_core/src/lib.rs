//! lampcheck_core: hardware-agnostic control logic for the lampcheck light rig.
//!
//! Design goals:
//! - Pure, testable logic (no runtime, no pin types).
//! - One owned `Monitor` context driven by a cooperative `tick()`.
//! - Hardware sits behind the `Board` trait; `hal::HalBoard` adapts embedded-hal pins.

pub mod error;

/// Severity-aware logging of core errors onto `tracing`.
pub mod logging;

/// Compiled-in thresholds and delays.
pub mod config;

/// Device lifecycle states, button events and the transition table.
pub mod lifecycle;

/// Button sampling and debounce.
pub mod input;

/// Timed on/off schedules for the indicator lights.
pub mod blink;

/// Light/sensor channel pairs.
pub mod channel;

/// Stabilization-window sensor verification.
pub mod verify;

/// Display write throttling.
pub mod display;

/// Hardware seam and timestamps.
pub mod board;

/// embedded-hal adapter for `Board`.
pub mod hal;

mod monitor;

pub use board::{Board, Millis};
pub use config::MonitorConfig;
pub use error::{CoreError, Result};
pub use monitor::{Monitor, TransitionRecord};
