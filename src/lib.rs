//! focusmeter is an HTTP service that scores uploaded images for sharpness.
//!
//! One analysis pipeline: decode → Gaussian blur → grayscale → Laplacian
//! variance plus intensity extrema, exposed over `POST /metrics`.

pub mod analysis;
pub mod api;
pub mod config;

use tracing_subscriber::EnvFilter;

/// Initialize logging, start the metrics server, and block until a
/// termination signal arrives.
pub async fn run() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let ctx = api::ApiContext::new();
    let mut server = api::start_metrics_server(ctx).await?;
    tracing::info!(addr = %server.addr(), "metrics API listening");

    shutdown_signal().await;

    server.shutdown();
    server.stopped().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("signal received, starting graceful shutdown");
}
