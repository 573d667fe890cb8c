//! lampcheck_core::lifecycle
//!
//! Pure device lifecycle semantics: states, operator events and the button
//! transition table. Per-state behavior lives in [`crate::Monitor`].
//!
//! Key ideas:
//! - Three buttons, each resolved against the current state into one event
//! - Every event has exactly one goal state; the only no-op is Stop while Sleeping
//! - Error and Finished are never entered from a button, only from the monitor itself

mod engine;
mod graph;
mod state;
mod transition;

pub use engine::{available_events, goal_state_for_button, resolve};
pub use graph::{transition_table, TransitionEdge, TransitionTable};
pub use state::{DeviceState, ALL_STATES};
pub use transition::TransitionEvent;
