use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use cubby_backend::SledBackend;
use cubby_server::{shutdown_signal, ApiServer, ServerMetrics, Settings};
use cubby_store::Store;

mod cli;
mod telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let settings = Settings::from_file(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;

    telemetry::init(&settings.log)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cubbyd starting");

    let backend = Arc::new(SledBackend::open(&settings.storage.path).with_context(|| {
        format!(
            "opening object database at {}",
            settings.storage.path.display()
        )
    })?);

    let store = Arc::new(Store::new(backend.clone()));
    let metrics = Arc::new(ServerMetrics::new().context("building metrics registry")?);

    let server = ApiServer::new(settings.api, Arc::clone(&store), metrics);
    server.serve(shutdown_signal()).await?;

    // Orderly shutdown: the listener has drained, snapshot memory to the
    // backend, then release it.
    store.stop();
    backend.close();
    tracing::info!("cubbyd stopped");

    Ok(())
}
