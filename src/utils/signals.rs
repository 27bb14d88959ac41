//! Signal handling for clean countdown cancellation

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::info;

/// Resolve when a termination signal (SIGINT, SIGTERM, SIGQUIT) arrives,
/// so the caller can stop the countdown instead of dying mid-tick.
pub async fn shutdown_signal() {
    let mut signals = Signals::new([
        signal_hook::consts::SIGINT,
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGQUIT,
    ])
    .expect("Failed to register signal handler");

    if let Some(signal) = signals.next().await {
        info!("Received signal {}, shutting down", signal);
    }
}
