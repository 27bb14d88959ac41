//! Countdown - a countdown timer state machine with a reactive tick stream
//!
//! This library provides a controller that owns a user-entered duration,
//! a running/idle state machine, and a once-per-second tick schedule that
//! publishes formatted `HH:MM:SS` frames until the countdown reaches zero
//! or is stopped.

pub mod config;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{CountdownController, Field, TickSnapshot, TimerState};
pub use tasks::countdown_tick_task;
pub use utils::signals::shutdown_signal;
