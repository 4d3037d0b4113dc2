use std::time::Duration;
use tokio::signal;

async fn wait_for_signal() -> &'static str {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => "Ctrl+C",
        _ = terminate => "SIGTERM",
    }
}

/// Resolves on Ctrl+C or SIGTERM. In-flight requests get `timeout` to
/// finish; after that the process exits regardless.
pub async fn shutdown_signal(timeout: Duration) {
    let source = wait_for_signal().await;
    tracing::info!(
        signal = source,
        timeout_secs = timeout.as_secs(),
        "initiating graceful shutdown"
    );

    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        tracing::warn!(timeout_secs = timeout.as_secs(), "connections still open after drain timeout, exiting");
        std::process::exit(1);
    });
}
