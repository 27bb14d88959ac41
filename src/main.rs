//! Countdown - count down from a HH:MM:SS duration in the terminal
//!
//! This is the main entry point for the countdown binary.

use std::sync::Arc;

use tracing::info;

use countdown::{
    config::Config,
    state::{CountdownController, Field, TickSnapshot, TimerState},
    tasks::countdown_tick_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown={}", config.log_level()))
        .init();

    info!("Starting countdown v0.1.0");

    let controller = Arc::new(CountdownController::new());

    // Hand the tick task its command receiver before anything can start
    let commands = controller.subscribe_commands();
    let tick_controller = Arc::clone(&controller);
    tokio::spawn(async move {
        countdown_tick_task(tick_controller, commands).await;
    });

    // Feed the raw CLI text through the controller's sanitization
    controller
        .set_component(Field::Hour, &config.hours)
        .map_err(anyhow::Error::msg)?;
    controller
        .set_component(Field::Minute, &config.minutes)
        .map_err(anyhow::Error::msg)?;
    controller
        .set_component(Field::Second, &config.seconds)
        .map_err(anyhow::Error::msg)?;

    let mut frames = controller.subscribe();
    controller.start().map_err(anyhow::Error::msg)?;

    // Print the initial frame published by start()
    render_frame(&frames.borrow_and_update().clone(), config.json)?;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let frame = frames.borrow_and_update().clone();
                render_frame(&frame, config.json)?;
                if frame.state == TimerState::AwaitingInput {
                    break;
                }
            }

            _ = &mut shutdown => {
                controller.stop().map_err(anyhow::Error::msg)?;
                break;
            }
        }
    }

    if let Some(started_at) = controller.started_at().map_err(anyhow::Error::msg)? {
        info!("Countdown started at {} is done", started_at.to_rfc3339());
    }

    Ok(())
}

/// Print one frame, either as plain HH:MM:SS or as a JSON object
fn render_frame(frame: &TickSnapshot, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(frame)?);
    } else {
        println!("{}", frame.display);
    }
    Ok(())
}
