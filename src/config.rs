//! Runtime configuration: fixed pipeline constants plus environment overrides.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::network::{DEFAULT_PROXY_URL, DEFAULT_UPSTREAM_URL};

/// Live snapshot cadence.
pub const LIVE_POLL_INTERVAL: Duration = Duration::from_millis(10_000);

/// Fixed pause between consecutive historical requests. Keeps the batch under
/// the upstream's per-minute request ceiling.
pub const HISTORICAL_REQUEST_DELAY: Duration = Duration::from_millis(2_000);

/// Maximum number of points kept per live series.
pub const LIVE_SERIES_CAPACITY: usize = 20;

/// Quote currency used when the caller does not name one.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Markets ordering used when the caller does not name one.
pub const DEFAULT_MARKET_ORDER: &str = "market_cap_desc";

/// Per-request timeout for the HTTP transport.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where requests go. Resolved once at startup, never per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    /// Straight to the upstream API.
    Direct { base_url: String },
    /// Through the CORS proxy endpoints.
    Proxy { base_url: String },
}

impl FetchTarget {
    pub fn direct(base_url: &str) -> Self {
        Self::Direct {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn proxy(base_url: &str) -> Self {
        Self::Proxy {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            Self::Direct { base_url } | Self::Proxy { base_url } => base_url,
        }
    }

    pub fn is_proxy(&self) -> bool {
        matches!(self, Self::Proxy { .. })
    }
}

impl Default for FetchTarget {
    fn default() -> Self {
        Self::direct(DEFAULT_UPSTREAM_URL)
    }
}

/// Client and dashboard configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub target: FetchTarget,
    pub poll_interval: Duration,
    pub request_delay: Duration,
    pub live_capacity: usize,
    pub request_timeout: Duration,
    /// Directory for persisted preferences. `None` ⇒ nothing is persisted.
    pub preferences_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: FetchTarget::default(),
            poll_interval: LIVE_POLL_INTERVAL,
            request_delay: HISTORICAL_REQUEST_DELAY,
            live_capacity: LIVE_SERIES_CAPACITY,
            request_timeout: REQUEST_TIMEOUT,
            preferences_dir: None,
        }
    }
}

impl Config {
    /// Build from `CRYPTOLIVE_*` environment variables, falling back to
    /// defaults for anything absent or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let target = match env_str("CRYPTOLIVE_TARGET", "direct").to_lowercase().as_str() {
            "proxy" => FetchTarget::proxy(&env_str("CRYPTOLIVE_BASE_URL", DEFAULT_PROXY_URL)),
            _ => FetchTarget::direct(&env_str("CRYPTOLIVE_BASE_URL", DEFAULT_UPSTREAM_URL)),
        };

        Self {
            target,
            poll_interval: env_millis("CRYPTOLIVE_POLL_MS", defaults.poll_interval),
            request_delay: env_millis("CRYPTOLIVE_REQUEST_DELAY_MS", defaults.request_delay),
            live_capacity: defaults.live_capacity,
            request_timeout: defaults.request_timeout,
            preferences_dir: env_opt("CRYPTOLIVE_PREFS_DIR").map(PathBuf::from),
        }
    }
}

/// Settings for the `cryptolive-proxy` server.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub bind: String,
    pub port: u16,
    pub upstream_url: String,
}

impl ProxyConfig {
    pub fn from_env() -> Self {
        Self {
            bind: env_str("CRYPTOLIVE_PROXY_BIND", "127.0.0.1"),
            port: env_opt("CRYPTOLIVE_PROXY_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            upstream_url: env_str("CRYPTOLIVE_UPSTREAM_URL", DEFAULT_UPSTREAM_URL),
        }
    }
}

fn env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_str(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

fn env_millis(name: &str, default: Duration) -> Duration {
    env_opt(name)
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.request_delay, Duration::from_secs(2));
        assert_eq!(config.live_capacity, 20);
        assert_eq!(config.target, FetchTarget::direct(DEFAULT_UPSTREAM_URL));
        assert!(config.preferences_dir.is_none());
    }

    #[test]
    fn test_fetch_target_trims_trailing_slash() {
        let target = FetchTarget::proxy("http://localhost:3000/");
        assert_eq!(target.base_url(), "http://localhost:3000");
        assert!(target.is_proxy());
        assert!(!FetchTarget::direct("https://x/").is_proxy());
    }

    #[test]
    fn test_env_millis_falls_back_on_garbage() {
        let name = "CRYPTOLIVE_TEST_ENV_MILLIS_GARBAGE";
        std::env::set_var(name, "soon");
        assert_eq!(env_millis(name, Duration::from_millis(5)), Duration::from_millis(5));
        std::env::set_var(name, " 250 ");
        assert_eq!(env_millis(name, Duration::from_millis(5)), Duration::from_millis(250));
        std::env::remove_var(name);
    }
}
