//! Display formatting helpers for the presentation layer.

pub mod num;
pub mod time;

pub use num::{format_change, format_usd};
pub use time::{format_display_time, Granularity};
