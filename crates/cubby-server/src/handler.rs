use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use cubby_store::{SaveOutcome, StoreError};
use cubby_types::{Object, ObjectKey};

use crate::error::ApiError;
use crate::metrics::METRICS_CONTENT_TYPE;
use crate::server::AppState;

/// Header carrying the requested object time-to-live, in whole seconds.
pub const TTL_HEADER: &str = "x-object-ttl";

/// `PUT /v1/objects/{key}` -- create or overwrite an object.
///
/// 201 for a brand-new key, 204 for an overwrite of an existing one.
pub async fn save_object(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let key: ObjectKey = match key.parse() {
        Ok(key) => key,
        Err(err) => {
            tracing::debug!(%err, "rejecting unparseable object key");
            return ApiError::invalid_input("cannot parse object key", err.to_string())
                .into_response();
        }
    };

    if let Err(err) = serde_json::from_slice::<serde_json::Value>(&body) {
        tracing::debug!(key, %err, "rejecting non-JSON body");
        return ApiError::invalid_input("body is not valid JSON", err.to_string()).into_response();
    }

    let object = match parse_ttl(&headers) {
        Some(ttl) => Object::with_ttl(key, body.to_vec(), ttl),
        None => Object::new(key, body.to_vec()),
    };

    match state.store.save(object) {
        Ok(SaveOutcome::Created(_)) => {
            state.metrics.objects_saved.inc();
            StatusCode::CREATED.into_response()
        }
        Ok(SaveOutcome::Updated) => {
            state.metrics.objects_saved.inc();
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => ApiError::internal("cannot save object", err.to_string()).into_response(),
    }
}

/// `GET /v1/objects/{key}` -- return the stored bytes.
pub async fn get_object(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    let key: ObjectKey = match key.parse() {
        Ok(key) => key,
        Err(err) => {
            tracing::debug!(%err, "rejecting unparseable object key");
            return ApiError::invalid_input("cannot parse object key", err.to_string())
                .into_response();
        }
    };

    match state.store.get(key) {
        Ok(object) => {
            state.metrics.objects_fetched.inc();
            (
                [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
                object.body,
            )
                .into_response()
        }
        Err(StoreError::NotFound(_)) => ApiError::not_found("object not found").into_response(),
        Err(err) => ApiError::internal("cannot fetch object", err.to_string()).into_response(),
    }
}

/// `GET /v1/probes/liveness`
pub async fn liveness(State(state): State<AppState>) -> Response {
    probe(&state)
}

/// `GET /v1/probes/readiness`
pub async fn readiness(State(state): State<AppState>) -> Response {
    probe(&state)
}

fn probe(state: &AppState) -> Response {
    match state.store.check() {
        Ok(()) => (StatusCode::OK, "ok").into_response(),
        Err(err) => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()).into_response(),
    }
}

/// `GET /metrics` -- Prometheus text exposition.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(text) => ([(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)], text).into_response(),
        Err(err) => ApiError::internal("cannot render metrics", err.to_string()).into_response(),
    }
}

/// Read the ttl header, if any. Unparseable values are logged and dropped;
/// the save proceeds without a ttl.
fn parse_ttl(headers: &HeaderMap) -> Option<Duration> {
    let raw = headers.get(TTL_HEADER)?;
    match raw.to_str().ok().and_then(|value| value.parse::<u64>().ok()) {
        Some(secs) => Some(Duration::from_secs(secs)),
        None => {
            tracing::warn!(header = TTL_HEADER, "ignoring unparseable ttl header");
            None
        }
    }
}
