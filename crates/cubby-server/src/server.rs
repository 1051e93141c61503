use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use cubby_store::Store;

use crate::config::ApiSettings;
use crate::error::{ServerError, ServerResult};
use crate::metrics::ServerMetrics;
use crate::router::build_router;

/// Shared handler state: the object store and the request counters.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub metrics: Arc<ServerMetrics>,
}

/// The depot's HTTP front end.
pub struct ApiServer {
    settings: ApiSettings,
    state: AppState,
}

impl ApiServer {
    pub fn new(settings: ApiSettings, store: Arc<Store>, metrics: Arc<ServerMetrics>) -> Self {
        Self {
            settings,
            state: AppState { store, metrics },
        }
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Serve requests until `shutdown` resolves, then drain in-flight
    /// requests and return.
    pub async fn serve(self, shutdown: impl Future<Output = ()> + Send + 'static) -> ServerResult<()> {
        let app = build_router(self.state);
        let listener =
            TcpListener::bind((self.settings.address.as_str(), self.settings.port)).await?;
        tracing::info!(address = %listener.local_addr()?, "object depot listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|err| ServerError::Internal(err.to_string()))
    }
}

/// Resolves on the first SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("cannot install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("cannot install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
