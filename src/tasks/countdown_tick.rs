//! Countdown tick background task

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, Instant};
use tracing::{debug, error, info, warn};

use crate::state::{CountdownController, TickOutcome, TimerCommand};

/// Interval between ticks of a running countdown
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Background task that owns the tick schedule for a controller.
///
/// The task idles on the command channel until the controller starts a
/// countdown, then drives one tick per second until the countdown
/// finishes or a stop command cancels it. Only one schedule is ever
/// active because the task runs the countdown loop inline.
pub async fn countdown_tick_task(
    controller: Arc<CountdownController>,
    mut commands: broadcast::Receiver<TimerCommand>,
) {
    info!("Starting countdown tick task");

    loop {
        match commands.recv().await {
            Ok(TimerCommand::Start) => {
                run_countdown(&controller, &mut commands).await;
            }
            Ok(TimerCommand::Stop) => {
                debug!("Stop command with no active countdown, ignoring");
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Tick task lagged behind {} commands", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => {
                info!("Controller dropped, stopping tick task");
                break;
            }
        }
    }
}

/// Tick the active countdown until it finishes or is cancelled. The
/// first tick fires one interval after start; the initial frame was
/// already published by `start()`.
async fn run_countdown(
    controller: &CountdownController,
    commands: &mut broadcast::Receiver<TimerCommand>,
) {
    let mut interval = time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match controller.advance_tick() {
                    Ok(TickOutcome::Running) => {}
                    Ok(TickOutcome::Finished) => break,
                    Err(e) => {
                        error!("Failed to advance countdown: {}", e);
                        break;
                    }
                }
            }

            command = commands.recv() => {
                match command {
                    Ok(TimerCommand::Stop) => {
                        // The controller already transitioned to idle;
                        // just drop the schedule.
                        debug!("Countdown cancelled, dropping tick schedule");
                        break;
                    }
                    Ok(TimerCommand::Start) => {
                        debug!("Start command while running, ignoring");
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Tick task lagged behind {} commands", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Field, TickSnapshot, TimerState};

    fn spawn_controller() -> (Arc<CountdownController>, tokio::task::JoinHandle<()>) {
        let controller = Arc::new(CountdownController::new());
        // Subscribe before spawning so no command can be missed
        let commands = controller.subscribe_commands();
        let task_controller = Arc::clone(&controller);
        let handle = tokio::spawn(countdown_tick_task(task_controller, commands));
        (controller, handle)
    }

    async fn next_frame(rx: &mut tokio::sync::watch::Receiver<TickSnapshot>) -> TickSnapshot {
        rx.changed().await.unwrap();
        rx.borrow_and_update().clone()
    }

    #[tokio::test(start_paused = true)]
    async fn counts_down_to_zero_and_returns_to_idle() {
        let (controller, _handle) = spawn_controller();
        let mut rx = controller.subscribe();

        controller.set_component(Field::Second, "3").unwrap();
        controller.start().unwrap();

        let first = next_frame(&mut rx).await;
        assert_eq!(first.display, "00:00:03");
        assert_eq!(first.state, TimerState::Running);

        assert_eq!(next_frame(&mut rx).await.display, "00:00:02");
        assert_eq!(next_frame(&mut rx).await.display, "00:00:01");

        let last = next_frame(&mut rx).await;
        assert_eq!(last.display, "00:00:00");
        assert_eq!(last.state, TimerState::AwaitingInput);
        assert_eq!(last.remaining_seconds, None);

        // The schedule is cancelled; no further frames arrive
        let quiet = time::timeout(Duration::from_secs(5), rx.changed()).await;
        assert!(quiet.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_a_running_countdown() {
        let (controller, _handle) = spawn_controller();
        let mut rx = controller.subscribe();

        controller.set_component(Field::Second, "10").unwrap();
        controller.start().unwrap();

        assert_eq!(next_frame(&mut rx).await.display, "00:00:10");
        assert_eq!(next_frame(&mut rx).await.display, "00:00:09");
        assert_eq!(next_frame(&mut rx).await.display, "00:00:08");

        controller.stop().unwrap();
        assert_eq!(controller.state().unwrap(), TimerState::AwaitingInput);

        let idle = next_frame(&mut rx).await;
        assert_eq!(idle.state, TimerState::AwaitingInput);
        assert_eq!(idle.display, "00:00:08");

        // The abandoned countdown publishes nothing further
        let quiet = time::timeout(Duration::from_secs(5), rx.changed()).await;
        assert!(quiet.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn controller_can_run_again_after_stopping() {
        let (controller, _handle) = spawn_controller();
        let mut rx = controller.subscribe();

        controller.set_component(Field::Second, "10").unwrap();
        controller.start().unwrap();
        assert_eq!(next_frame(&mut rx).await.display, "00:00:10");
        controller.stop().unwrap();
        assert_eq!(next_frame(&mut rx).await.state, TimerState::AwaitingInput);

        controller.set_component(Field::Second, "2").unwrap();
        controller.start().unwrap();
        assert_eq!(next_frame(&mut rx).await.display, "00:00:02");
        assert_eq!(next_frame(&mut rx).await.display, "00:00:01");

        let last = next_frame(&mut rx).await;
        assert_eq!(last.display, "00:00:00");
        assert_eq!(last.state, TimerState::AwaitingInput);
    }
}
