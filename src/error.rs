//! Unified error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("At least one asset must stay tracked")]
    LastAsset,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetch-client errors. One request, one classification.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HttpError {
    #[error("Rate limited by upstream (HTTP 429)")]
    RateLimited,

    /// No HTTP response was received (connectivity loss, CORS denial, timeout).
    #[error("Request blocked: {0}")]
    Blocked(String),

    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl HttpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RateLimited => ErrorKind::RateLimit,
            Self::Blocked(_) => ErrorKind::Blocked,
            Self::Upstream { .. } | Self::Decode(_) => ErrorKind::UpstreamError,
        }
    }

    /// Rate limits and network blocks invalidate a whole batch, not one item.
    pub fn is_systemic(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Blocked(_))
    }

    /// HTTP status carried by the error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited => Some(429),
            Self::Upstream { status, .. } => Some(*status),
            Self::Blocked(_) | Self::Decode(_) => None,
        }
    }

    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            429 => Self::RateLimited,
            _ => Self::Upstream { status, body },
        }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Self::Decode(e.to_string());
        }
        match e.status() {
            Some(status) => Self::from_status(status.as_u16(), e.to_string()),
            None => Self::Blocked(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

/// Public error taxonomy shown to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    RateLimit,
    Blocked,
    UpstreamError,
    MissingParam,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RateLimit => "RATE_LIMIT",
            Self::Blocked => "BLOCKED",
            Self::UpstreamError => "UPSTREAM_ERROR",
            Self::MissingParam => "MISSING_PARAM",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
