//! TUI inspector for the register.
//!
//! Provides an interactive terminal front-end with:
//! - A 64-cell bit grid with a movable cursor
//! - Hex/dec/oct/bin renderings of the value
//! - An input line for expressions and session commands
//! - The calculator transcript

mod app;
mod ui;

pub use app::{InspectorApp, run_inspector};
