//! Timer state machine states and tick snapshots

use serde::{Deserialize, Serialize};

use super::display::format_hms;

/// The two states of the countdown state machine.
///
/// `AwaitingInput` is both the initial state and the state the controller
/// returns to when a countdown finishes or is stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    AwaitingInput,
    Running,
}

impl TimerState {
    /// Check if a countdown is currently active
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        TimerState::AwaitingInput
    }
}

/// One published frame of the countdown: the state, the formatted
/// "HH:MM:SS" display, and the remaining seconds while running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub state: TimerState,
    pub display: String,
    pub remaining_seconds: Option<u64>,
}

impl TickSnapshot {
    /// Snapshot for an idle controller showing the given display
    pub fn idle(display: String) -> Self {
        Self {
            state: TimerState::AwaitingInput,
            display,
            remaining_seconds: None,
        }
    }

    /// Snapshot for a running countdown with the given remaining seconds
    pub fn running(remaining_seconds: u64) -> Self {
        Self {
            state: TimerState::Running,
            display: format_hms(remaining_seconds),
            remaining_seconds: Some(remaining_seconds),
        }
    }
}

impl Default for TickSnapshot {
    fn default() -> Self {
        Self::idle(format_hms(0))
    }
}
