//! Signal handling for graceful host shutdown.

use lucky_event_system::ShutdownState;
use tokio::signal;
use tracing::info;

/// Waits for SIGINT/SIGTERM (Ctrl+C on Windows) and initiates `shutdown`.
pub async fn wait_for_shutdown_signal(shutdown: ShutdownState) -> Result<(), std::io::Error> {
    #[cfg(unix)]
    {
        use signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => (),
            _ = sigterm.recv() => ()
        }
    }

    #[cfg(windows)]
    signal::ctrl_c().await?;

    info!("📡 Received shutdown signal - initiating graceful shutdown");
    shutdown.initiate_shutdown();
    Ok(())
}
