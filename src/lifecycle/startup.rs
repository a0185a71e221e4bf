//! Startup orchestration.
//!
//! Ordered startup: the validated config is turned into an [`EdgeServer`]
//! (which builds the CSP and header set), then the listener is bound, then a
//! signal watcher is spawned, then traffic is accepted. Any failure is fatal.

use tokio::net::TcpListener;

use crate::config::EdgeConfig;
use crate::http::server::{EdgeServer, ServerError};
use crate::lifecycle::{signals, Shutdown};

/// Run the edge server until SIGINT/SIGTERM.
pub async fn run(config: EdgeConfig) -> Result<(), ServerError> {
    let shutdown = Shutdown::new();
    let server = EdgeServer::new(config, shutdown.clone())?;

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        tracing::info!("Shutdown signal received");
        trigger.trigger();
    });

    server.run(listener).await
}
