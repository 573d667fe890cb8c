//! lampcheck_sim
//!
//! Runs the lampcheck monitor against a virtual rig: lights mirror into
//! sensor readings, the display logs its repaints, and buttons arrive from
//! stdin or a scripted schedule.

pub mod config;
pub mod rig;
pub mod runner;
pub mod script;
