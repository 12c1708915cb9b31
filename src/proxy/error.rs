//! Proxy error type and its JSON rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::error::{ErrorKind, HttpError};

/// Message returned for every upstream failure, whatever its cause.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Failed to fetch from CoinGecko";

/// Errors rendered by the proxy endpoints as `{ "error": string }`.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),

    #[error("{}", UPSTREAM_FAILURE_MESSAGE)]
    Upstream(#[from] HttpError),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParam(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingParam(_) => ErrorKind::MissingParam,
            Self::Upstream(e) => e.kind(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        if let Self::Upstream(e) = &self {
            tracing::error!(kind = %e.kind(), "upstream request failed: {e}");
        }
        let body = json!({ "error": self.to_string() });
        (self.status(), axum::Json(body)).into_response()
    }
}
