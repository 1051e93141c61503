use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

use crate::error::ServerResult;

/// Prometheus text exposition content type.
pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Request counters exposed on `/metrics`.
pub struct ServerMetrics {
    registry: Registry,
    pub objects_saved: IntCounter,
    pub objects_fetched: IntCounter,
}

impl ServerMetrics {
    /// Build the registry and register every counter.
    pub fn new() -> ServerResult<Self> {
        let registry = Registry::new();

        let objects_saved = IntCounter::new(
            "cubby_objects_saved_total",
            "Objects accepted through the save endpoint",
        )?;
        let objects_fetched = IntCounter::new(
            "cubby_objects_fetched_total",
            "Objects returned through the fetch endpoint",
        )?;

        registry.register(Box::new(objects_saved.clone()))?;
        registry.register(Box::new(objects_fetched.clone()))?;

        Ok(Self {
            registry,
            objects_saved,
            objects_fetched,
        })
    }

    /// Render the registry in the Prometheus text format.
    pub fn render(&self) -> ServerResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|err| crate::error::ServerError::Internal(err.to_string()))
    }
}
