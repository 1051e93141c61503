use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors from server construction and serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("metrics registry error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// Client-facing error envelope, rendered as JSON `{code, title, detail}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: &'static str,
    pub title: String,
    pub detail: String,
    #[serde(skip)]
    status: StatusCode,
}

impl ApiError {
    /// 400: the request could not be parsed or validated.
    pub fn invalid_input(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code: "INVALID_INPUT",
            title: title.into(),
            detail: detail.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    /// 404: the requested object does not exist.
    pub fn not_found(title: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND",
            title: title.into(),
            detail: String::new(),
            status: StatusCode::NOT_FOUND,
        }
    }

    /// 500: the request was valid but the server failed to serve it.
    pub fn internal(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL",
            title: title.into(),
            detail: detail.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP status this envelope renders with.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}
