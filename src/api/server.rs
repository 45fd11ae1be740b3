//! Metrics server lifecycle: bind, spawn the serve task in the
//! background, return a handle carrying a shutdown channel.
//!
//! Tests bind port 0 through `start_metrics_server_on`.

use std::net::SocketAddr;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::metrics_router;
use crate::api::types::ApiContext;
use crate::config;

/// Handle to a running metrics server.
pub struct MetricsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl MetricsServer {
    /// Address the listener actually bound (resolves port 0).
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal the server to stop accepting and drain. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("metrics server shutdown signal sent");
        }
    }

    /// Wait for the background serve task to finish.
    pub async fn stopped(self) {
        let _ = self.task.await;
    }
}

/// Start the metrics server on the default listen address.
pub async fn start_metrics_server(ctx: ApiContext) -> std::io::Result<MetricsServer> {
    start_metrics_server_on(ctx, config::default_listen_addr()).await
}

/// Start the metrics server on a specific address.
///
/// Binds the listener, mounts `metrics_router`, and spawns `axum::serve`
/// in a background tokio task with a graceful-shutdown channel.
pub async fn start_metrics_server_on(
    ctx: ApiContext,
    addr: SocketAddr,
) -> std::io::Result<MetricsServer> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let addr = listener.local_addr()?;

    tracing::info!(%addr, "metrics server binding");

    let app = metrics_router(ctx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("metrics server received shutdown signal");
        };

        tracing::info!(%addr, "metrics server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("metrics server error: {e}");
        }

        tracing::info!("metrics server stopped");
    });

    Ok(MetricsServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}
