//! Prediction server lifecycle — starts/stops the axum HTTP server.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::prediction_router;
use crate::api::types::ApiContext;
use crate::config::ServerConfig;

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

/// Where a running server is listening.
#[derive(Debug, Clone)]
pub struct ServerSession {
    pub server_addr: String,
    pub port: u16,
}

/// Handle to a running prediction server.
pub struct PredictionServer {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PredictionServer {
    /// Signal a graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Prediction server shutdown signal sent");
        }
    }

    /// Signal shutdown and wait for in-flight requests to finish.
    pub async fn stop(mut self) {
        self.shutdown();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!("Prediction server task failed: {e}");
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Start the prediction server on the configured address.
pub async fn start_server(config: &ServerConfig) -> Result<PredictionServer, String> {
    start_server_on(config.addr, ApiContext::from_config(config)).await
}

/// Start the prediction server on a specific address with a prepared context.
///
/// Port 0 binds an ephemeral port; tests use `127.0.0.1:0`.
pub async fn start_server_on(
    addr: SocketAddr,
    ctx: ApiContext,
) -> Result<PredictionServer, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind prediction server on {addr}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = prediction_router(ctx);

    let session = ServerSession {
        server_addr: addr.to_string(),
        port: addr.port(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Prediction server received shutdown signal");
        };

        tracing::info!(%addr, "Prediction server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Prediction server error: {e}");
        }

        tracing::info!("Prediction server stopped");
    });

    Ok(PredictionServer {
        session,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

/// Run the server until Ctrl-C, then shut down gracefully.
pub async fn serve_until_ctrl_c(config: &ServerConfig) -> Result<(), String> {
    let server = start_server(config).await?;
    tracing::info!(
        addr = %server.session.server_addr,
        strategy = %config.factor_strategy,
        "Listening for CSV uploads on /predict"
    );

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for Ctrl-C: {e}"))?;

    server.stop().await;
    Ok(())
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
