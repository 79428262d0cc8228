//! Accessors for the external reference-data and player-stats sources.

pub mod client;
pub mod http;

pub use client::SiegeClient;
pub use http::{REFERENCE_BASE_URL, STATS_BASE_URL};
