//! HTTP utilities shared by the data-source accessors

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;

use crate::{Result, TOKEN_ENV_VAR};

/// Default per-request timeout when the caller does not supply one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Build auth headers from `SIEGE_STATS_TOKEN`, if present.
///
/// Returns `Ok(None)` when the env var is missing (unauthenticated sources).
pub fn maybe_auth_header_map() -> Result<Option<HeaderMap>> {
    let token = std::env::var(TOKEN_ENV_VAR).ok();
    if let Some(token) = token {
        let mut h = HeaderMap::new();
        h.insert(ACCEPT, HeaderValue::from_static("application/json"));
        h.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        Ok(Some(h))
    } else {
        Ok(None)
    }
}

/// Headers every request carries regardless of authentication.
pub fn default_header_map() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h
}

/// Build a client honoring the caller-supplied timeout budget.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}
