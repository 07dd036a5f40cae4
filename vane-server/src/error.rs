use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use vane::VaneError;

/// Failure returned by an endpoint handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request itself was malformed.
    #[error("{0}")]
    BadRequest(String),
    /// No upstream could serve the request.
    #[error("{0}")]
    BadGateway(String),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<VaneError> for ApiError {
    fn from(e: VaneError) -> Self {
        match e {
            VaneError::InvalidArg(msg) => Self::BadRequest(msg),
            other => Self::BadGateway(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = %status, error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
