//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the upstream sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// Upstream asset slug (e.g. `"bitcoin"`, `"avalanche-2"`). Serializes as
/// the bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Join ids into the comma-separated list the upstream expects.
pub fn join_ids(ids: &[AssetId]) -> String {
    ids.iter().map(AssetId::as_str).collect::<Vec<_>>().join(",")
}

// ─── Interval ────────────────────────────────────────────────────────────────

/// Historical sampling granularity accepted by the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Hourly,
    Daily,
}

impl Interval {
    /// The upstream only serves hourly points for the one-day window.
    pub fn for_days(days: u32) -> Self {
        if days == 1 {
            Self::Hourly
        } else {
            Self::Daily
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            other => Err(format!("unknown interval: {other}")),
        }
    }
}

// ─── TimeRange ───────────────────────────────────────────────────────────────

/// A historical window: how many days back, at which granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    pub days: u32,
    pub interval: Interval,
}

impl Window {
    pub fn new(days: u32) -> Self {
        Self {
            days,
            interval: Interval::for_days(days),
        }
    }
}

/// Dashboard time range selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "LIVE")]
    Live,
    #[serde(rename = "24H")]
    Day,
    #[serde(rename = "7D")]
    Week,
    #[serde(rename = "30D")]
    Month,
    #[serde(rename = "1Y")]
    Year,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        Self::Live,
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "LIVE",
            Self::Day => "24H",
            Self::Week => "7D",
            Self::Month => "30D",
            Self::Year => "1Y",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::Day => "24 Hours",
            Self::Week => "7 Days",
            Self::Month => "30 Days",
            Self::Year => "1 Year",
        }
    }

    /// Static window for historical ranges; `None` for `Live`.
    pub fn window(&self) -> Option<Window> {
        match self {
            Self::Live => None,
            Self::Day => Some(Window::new(1)),
            Self::Week => Some(Window::new(7)),
            Self::Month => Some(Window::new(30)),
            Self::Year => Some(Window::new(365)),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown time range: {s}"))
    }
}
