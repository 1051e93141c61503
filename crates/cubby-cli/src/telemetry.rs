use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use cubby_server::LogSettings;

/// Install the global tracing subscriber from the log settings.
///
/// `RUST_LOG` overrides the configured level when set. Unknown levels or
/// formats are startup errors.
pub fn init(settings: &LogSettings) -> Result<()> {
    match settings.level.as_str() {
        "debug" | "info" | "warn" | "error" => {}
        other => bail!("unsupported log level: {other}"),
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .context("building log filter")?;

    match settings.format.as_str() {
        "text" => tracing_subscriber::fmt().with_env_filter(filter).init(),
        "json" => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        other => bail!("unsupported log format: {other}"),
    }

    Ok(())
}
