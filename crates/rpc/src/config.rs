use crate::Gateway;
use core::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

/// Configuration for the gateway server.
#[derive(Clone, Copy, Debug)]
pub struct ServeConfig {
    /// HTTP server address.
    pub http: SocketAddr,
}

impl ServeConfig {
    /// Listen on all interfaces at `port`.
    pub fn all_interfaces(port: u16) -> Self {
        Self { http: SocketAddr::from(([0, 0, 0, 0], port)) }
    }

    /// Serve the gateway until `shutdown` resolves. In-flight requests are
    /// allowed to complete.
    pub async fn serve<F>(&self, gateway: Gateway, shutdown: F) -> eyre::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.http).await?;
        info!(addr = %listener.local_addr()?, "gateway listening");

        axum::serve(listener, gateway.into_router()).with_graceful_shutdown(shutdown).await?;

        info!("gateway stopped");
        Ok(())
    }
}

/// Resolves on SIGINT, or on SIGTERM, SIGHUP or SIGQUIT on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(%e, "failed to listen for ctrl-c");
            core::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let other = async {
        use tokio::signal::unix::SignalKind;
        tokio::select! {
            _ = unix_signal(SignalKind::terminate(), "SIGTERM") => "SIGTERM",
            _ = unix_signal(SignalKind::hangup(), "SIGHUP") => "SIGHUP",
            _ = unix_signal(SignalKind::quit(), "SIGQUIT") => "SIGQUIT",
        }
    };

    #[cfg(not(unix))]
    let other = core::future::pending::<&str>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT"),
        name = other => info!(signal = name, "received shutdown signal"),
    }
}

/// Resolves on the first delivery of `kind`. Never resolves if the handler
/// cannot be installed.
#[cfg(unix)]
async fn unix_signal(kind: tokio::signal::unix::SignalKind, name: &str) {
    match tokio::signal::unix::signal(kind) {
        Ok(mut sig) => {
            sig.recv().await;
        }
        Err(e) => {
            tracing::error!(%e, signal = name, "failed to install signal handler");
            core::future::pending::<()>().await;
        }
    }
}
