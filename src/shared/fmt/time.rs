//! Display-time labels for chart points. Rendered in UTC.

use chrono::{DateTime, Utc};

/// How much of a timestamp a chart label shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// `Nov 14` — multi-day historical windows.
    Date,
    /// `Nov 14, 22:13` — the one-day window.
    DateTime,
    /// `22:13:20` — live points.
    Clock,
}

impl Granularity {
    pub fn for_window(days: u32) -> Self {
        if days == 1 {
            Self::DateTime
        } else {
            Self::Date
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            Self::Date => "%b %-d",
            Self::DateTime => "%b %-d, %H:%M",
            Self::Clock => "%H:%M:%S",
        }
    }
}

/// Format a millisecond Unix timestamp.
pub fn format_display_time(timestamp_ms: i64, granularity: Granularity) -> String {
    let at = DateTime::<Utc>::from_timestamp_millis(timestamp_ms).unwrap_or_default();
    at.format(granularity.pattern()).to_string()
}
