//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains some of:
//! - `mod.rs` — Domain types used by the dashboard
//! - `wire.rs` — Raw serde structs matching upstream responses
//! - `convert.rs` — Wire → domain conversions
//! - `state.rs` — State containers with update methods (for poll-driven data)
//! - `client.rs` — Sub-client with HTTP methods and caching

pub mod asset;
pub mod market;
pub mod price_history;
pub mod quote;
