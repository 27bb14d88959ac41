//! Countdown controller state management

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::display::format_hms;
use super::duration_input::{DurationInput, Field};
use super::timer_state::{TickSnapshot, TimerState};

/// Commands sent from the controller to the tick task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start,
    Stop,
}

/// What a tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown is still running
    Running,
    /// The countdown reached zero or was already stopped; the schedule
    /// must be cancelled
    Finished,
}

#[derive(Debug)]
struct ControllerInner {
    state: TimerState,
    remaining_seconds: u64,
    input: DurationInput,
    started_at: Option<DateTime<Utc>>,
}

/// The countdown controller: owns the duration input, the state machine
/// and the remaining time, and publishes a [`TickSnapshot`] on every
/// transition and tick.
///
/// The controller does not tick itself; a single
/// [`countdown_tick_task`](crate::tasks::countdown_tick_task) drives the
/// schedule and is told to arm or cancel it through a command channel.
#[derive(Debug)]
pub struct CountdownController {
    inner: Mutex<ControllerInner>,
    /// Channel telling the tick task to arm or cancel the schedule
    command_tx: broadcast::Sender<TimerCommand>,
    /// Channel publishing snapshots to reactive consumers
    snapshot_tx: watch::Sender<TickSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TickSnapshot>,
}

impl CountdownController {
    /// Create an idle controller with all components empty
    pub fn new() -> Self {
        let (command_tx, _) = broadcast::channel(16);
        let (snapshot_tx, snapshot_rx) = watch::channel(TickSnapshot::default());

        Self {
            inner: Mutex::new(ControllerInner {
                state: TimerState::AwaitingInput,
                remaining_seconds: 0,
                input: DurationInput::new(),
                started_at: None,
            }),
            command_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Subscribe to the command channel. The tick task must hold its
    /// receiver before `start()` can be observed.
    pub fn subscribe_commands(&self) -> broadcast::Receiver<TimerCommand> {
        self.command_tx.subscribe()
    }

    /// Subscribe to published snapshots
    pub fn subscribe(&self) -> watch::Receiver<TickSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Sanitize and store one duration component. Valid in any state;
    /// a running countdown keeps its frozen remaining time and the new
    /// value is picked up by the next `start()`.
    pub fn set_component(&self, field: Field, raw: &str) -> Result<(), String> {
        let mut inner = self.inner.lock()
            .map_err(|e| format!("Failed to lock controller state: {}", e))?;

        inner.input.set(field, raw);
        debug!("Set {:?} component to {:?}", field, inner.input.component(field));
        Ok(())
    }

    /// Stored text of one duration component
    pub fn component(&self, field: Field) -> Result<String, String> {
        self.inner.lock()
            .map(|inner| inner.input.component(field).to_string())
            .map_err(|e| format!("Failed to lock controller state: {}", e))
    }

    /// Freeze the entered duration and start the countdown. Ignored with
    /// a debug log if a countdown is already running.
    pub fn start(&self) -> Result<(), String> {
        let snapshot = {
            let mut inner = self.inner.lock()
                .map_err(|e| format!("Failed to lock controller state: {}", e))?;

            if inner.state.is_running() {
                debug!("start() while running, ignoring");
                return Ok(());
            }

            inner.input.normalize();
            let remaining = inner.input.total_seconds();
            inner.state = TimerState::Running;
            inner.remaining_seconds = remaining;
            inner.started_at = Some(Utc::now());
            TickSnapshot::running(remaining)
        };

        info!("Countdown started: {} ({} seconds)",
              snapshot.display, snapshot.remaining_seconds.unwrap_or(0));
        self.publish(snapshot);
        self.send_command(TimerCommand::Start);
        Ok(())
    }

    /// Cancel a running countdown and return to awaiting input. Ignored
    /// with a debug log if no countdown is running. Once this returns,
    /// no further frames are published for the abandoned countdown.
    pub fn stop(&self) -> Result<(), String> {
        let snapshot = {
            let mut inner = self.inner.lock()
                .map_err(|e| format!("Failed to lock controller state: {}", e))?;

            if !inner.state.is_running() {
                debug!("stop() while awaiting input, ignoring");
                return Ok(());
            }

            let abandoned = inner.remaining_seconds;
            inner.state = TimerState::AwaitingInput;
            inner.remaining_seconds = 0;
            info!("Countdown stopped with {} seconds remaining", abandoned);
            TickSnapshot::idle(format_hms(abandoned))
        };

        self.publish(snapshot);
        self.send_command(TimerCommand::Stop);
        Ok(())
    }

    /// Advance the countdown by one tick: decrement, publish the frame
    /// for the new remaining value, and finish once it reaches zero.
    ///
    /// Called by the tick task each interval. If a stop raced the tick
    /// the state is already `AwaitingInput` and the tick publishes
    /// nothing.
    pub fn advance_tick(&self) -> Result<TickOutcome, String> {
        let (snapshot, outcome) = {
            let mut inner = self.inner.lock()
                .map_err(|e| format!("Failed to lock controller state: {}", e))?;

            if !inner.state.is_running() {
                debug!("Tick after stop, ignoring");
                return Ok(TickOutcome::Finished);
            }

            inner.remaining_seconds = inner.remaining_seconds.saturating_sub(1);
            let remaining = inner.remaining_seconds;
            if remaining == 0 {
                inner.state = TimerState::AwaitingInput;
                (TickSnapshot::idle(format_hms(0)), TickOutcome::Finished)
            } else {
                (TickSnapshot::running(remaining), TickOutcome::Running)
            }
        };

        debug!("Tick: {}", snapshot.display);
        if outcome == TickOutcome::Finished {
            info!("Countdown finished");
        }
        self.publish(snapshot);
        Ok(outcome)
    }

    /// Current state of the state machine
    pub fn state(&self) -> Result<TimerState, String> {
        self.inner.lock()
            .map(|inner| inner.state)
            .map_err(|e| format!("Failed to lock controller state: {}", e))
    }

    /// The most recently published "HH:MM:SS" display
    pub fn current_display(&self) -> String {
        self.snapshot_tx.borrow().display.clone()
    }

    /// When the most recent countdown was started, if any
    pub fn started_at(&self) -> Result<Option<DateTime<Utc>>, String> {
        self.inner.lock()
            .map(|inner| inner.started_at)
            .map_err(|e| format!("Failed to lock controller state: {}", e))
    }

    fn publish(&self, snapshot: TickSnapshot) {
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to publish tick snapshot: {}", e);
        }
    }

    fn send_command(&self, command: TimerCommand) {
        // Fails only when the tick task is not running, e.g. in unit
        // tests driving advance_tick() directly.
        if let Err(e) = self.command_tx.send(command) {
            debug!("No tick task listening for {:?}: {}", command, e);
        }
    }
}

impl Default for CountdownController {
    fn default() -> Self {
        Self::new()
    }
}
