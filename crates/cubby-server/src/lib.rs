//! HTTP API for the cubby object depot.
//!
//! Thin glue over the store: object save/fetch endpoints, liveness and
//! readiness probes, Prometheus metrics, and the settings the process is
//! wired from. Requests with a body must declare `Content-Type:
//! application/json` and bodies are validated as JSON at this boundary;
//! below it the object bytes are opaque.

pub mod config;
pub mod error;
pub mod handler;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod server;

pub use config::{ApiSettings, LogSettings, Settings, StorageSettings};
pub use error::{ApiError, ServerError, ServerResult};
pub use metrics::ServerMetrics;
pub use router::build_router;
pub use server::{shutdown_signal, ApiServer, AppState};

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::util::ServiceExt;

    use cubby_backend::MemoryBackend;
    use cubby_store::Store;

    use super::*;

    fn test_state() -> AppState {
        let backend = Arc::new(MemoryBackend::new());
        let store = Arc::new(Store::new(backend));
        let metrics = Arc::new(ServerMetrics::new().unwrap());
        AppState { store, metrics }
    }

    fn put_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    fn app(state: &AppState) -> Router {
        build_router(state.clone())
    }

    // -----------------------------------------------------------------------
    // Probes
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn liveness_probe() {
        let state = test_state();
        let response = app(&state)
            .oneshot(get_request("/v1/probes/liveness"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"ok");
    }

    #[tokio::test]
    async fn readiness_probe() {
        let state = test_state();
        let response = app(&state)
            .oneshot(get_request("/v1/probes/readiness"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // -----------------------------------------------------------------------
    // Save / fetch
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn put_then_get_roundtrips() {
        let state = test_state();
        let app = app(&state);

        let response = app
            .clone()
            .oneshot(put_request("/v1/objects/1", "{\"a\":1}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.oneshot(get_request("/v1/objects/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
        assert_eq!(body_bytes(response).await, b"{\"a\":1}");
    }

    #[tokio::test]
    async fn second_put_updates_in_place() {
        let state = test_state();
        let app = app(&state);

        app.clone()
            .oneshot(put_request("/v1/objects/1", "{\"a\":1}"))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(put_request("/v1/objects/1", "{\"a\":2}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(get_request("/v1/objects/1")).await.unwrap();
        assert_eq!(body_bytes(response).await, b"{\"a\":2}");
    }

    #[tokio::test]
    async fn get_missing_object_is_404_envelope() {
        let state = test_state();
        let response = app(&state)
            .oneshot(get_request("/v1/objects/42"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let envelope = body_json(response).await;
        assert_eq!(envelope["code"], "NOT_FOUND");
        assert_eq!(envelope["title"], "object not found");
    }

    #[tokio::test]
    async fn negative_keys_are_accepted() {
        let state = test_state();
        let app = app(&state);

        let response = app
            .clone()
            .oneshot(put_request("/v1/objects/-7", "null"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app.oneshot(get_request("/v1/objects/-7")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // -----------------------------------------------------------------------
    // Input validation
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn unparseable_key_is_rejected() {
        let state = test_state();
        let app = app(&state);

        let response = app
            .clone()
            .oneshot(put_request("/v1/objects/abc", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "INVALID_INPUT");

        let response = app.oneshot(get_request("/v1/objects/abc")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_json_body_is_rejected() {
        let state = test_state();
        let response = app(&state)
            .oneshot(put_request("/v1/objects/1", "not json at all"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let envelope = body_json(response).await;
        assert_eq!(envelope["code"], "INVALID_INPUT");
        assert_eq!(envelope["title"], "body is not valid JSON");
    }

    #[tokio::test]
    async fn missing_content_type_is_rejected() {
        let state = test_state();
        let request = Request::builder()
            .method("PUT")
            .uri("/v1/objects/1")
            .body(Body::from("{}"))
            .unwrap();

        let response = app(&state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn wrong_content_type_is_rejected() {
        let state = test_state();
        let request = Request::builder()
            .method("PUT")
            .uri("/v1/objects/1")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("{}"))
            .unwrap();

        let response = app(&state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_is_exempt_from_content_type_check() {
        let state = test_state();
        let response = app(&state)
            .oneshot(get_request("/v1/probes/liveness"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // -----------------------------------------------------------------------
    // Time-to-live header
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn ttl_header_is_stored_with_the_object() {
        let state = test_state();
        let request = Request::builder()
            .method("PUT")
            .uri("/v1/objects/1")
            .header(header::CONTENT_TYPE, "application/json")
            .header(handler::TTL_HEADER, "30")
            .body(Body::from("{}"))
            .unwrap();

        let response = app(&state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            state.store.get(1).unwrap().ttl,
            Some(Duration::from_secs(30))
        );
    }

    #[tokio::test]
    async fn unparseable_ttl_header_is_ignored() {
        let state = test_state();
        let request = Request::builder()
            .method("PUT")
            .uri("/v1/objects/1")
            .header(header::CONTENT_TYPE, "application/json")
            .header(handler::TTL_HEADER, "soon")
            .body(Body::from("{}"))
            .unwrap();

        let response = app(&state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(state.store.get(1).unwrap().ttl.is_none());
    }

    // -----------------------------------------------------------------------
    // Metrics
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn metrics_endpoint_counts_requests() {
        let state = test_state();
        let app = app(&state);

        app.clone()
            .oneshot(put_request("/v1/objects/1", "{}"))
            .await
            .unwrap();
        app.clone()
            .oneshot(get_request("/v1/objects/1"))
            .await
            .unwrap();

        let response = app.oneshot(get_request("/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let text = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(text.contains("cubby_objects_saved_total 1"));
        assert!(text.contains("cubby_objects_fetched_total 1"));
    }

    // -----------------------------------------------------------------------
    // Server construction
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn server_builds_router() {
        let state = test_state();
        let server = ApiServer::new(ApiSettings::default(), state.store, state.metrics);
        let _router = server.router();
    }
}
