//! State management module
//!
//! This module contains the countdown state machine, the duration input
//! fields, and the controller that ties them together.

pub mod controller;
pub mod display;
pub mod duration_input;
pub mod timer_state;

// Re-export main types
pub use controller::{CountdownController, TickOutcome, TimerCommand};
pub use display::format_hms;
pub use duration_input::{DurationInput, Field};
pub use timer_state::{TickSnapshot, TimerState};
