//! Graceful shutdown trigger for the HTTP server.

use tokio::signal;

/// Resolves once the process is asked to stop: Ctrl+C, or SIGTERM on unix.
///
/// A signal source that fails to install is logged and then never fires; the
/// other one still stops the server.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    let name = tokio::select! {
        () = ctrl_c => "ctrl-c",
        () = terminate() => "sigterm",
    };
    tracing::info!(signal = name, "Shutdown signal received, draining connections");
}

#[cfg(unix)]
async fn terminate() {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "SIGTERM handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
