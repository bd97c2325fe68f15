//! Server bootstrap.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use leadbox_core::Result;

/// Serves a router until ctrl-c.
pub struct Server {
    addr: SocketAddr,
    router: Router,
}

impl Server {
    /// Creates a server for the given bind address and router.
    pub fn new(addr: SocketAddr, router: Router) -> Self {
        Self { addr, router }
    }

    /// Binds and serves; returns once shutdown completes.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!(addr = %self.addr, "leadbox listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
