use axum::extract::Request;
use axum::http::{header, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Reject non-GET requests that do not declare a JSON body.
pub async fn require_json_content(request: Request, next: Next) -> Response {
    if request.method() != Method::GET {
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());

        if content_type != Some("application/json") {
            tracing::warn!(?content_type, "rejecting request with unknown Content-Type");
            return ApiError::invalid_input(
                "unknown Content-Type",
                "requests with a body must send Content-Type: application/json",
            )
            .into_response();
        }
    }

    next.run(request).await
}
