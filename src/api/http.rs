//! Raw HTTP calls against the data sources.
//!
//! These functions do one request each and translate failures into typed
//! errors; caching and concurrency live in [`crate::api::client`]. No
//! automatic retries happen here: the caller decides whether to re-invoke.

use reqwest::{header::HeaderMap, Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::core::cache::ReferenceKind;
use crate::error::{Result, SiegeError};
use crate::model::{Board, Platform};

/// Base path for the reference-data source (operators, weapons, maps).
pub const REFERENCE_BASE_URL: &str = "https://api.r6data.example.com/v1";

/// Base path for the per-player ranked stats source.
pub const STATS_BASE_URL: &str = "https://stats.r6data.example.com/v2";

/// Fetch one reference collection as a raw JSON payload.
pub async fn get_reference_data(
    client: &Client,
    base_url: &str,
    headers: HeaderMap,
    kind: ReferenceKind,
    filters: &[(String, String)],
    timeout_secs: u64,
) -> Result<Value> {
    let url = format!("{}/{}", base_url, kind);
    debug!(%url, ?filters, "fetching reference data");

    let res = client
        .get(&url)
        .headers(headers)
        .query(filters)
        .send()
        .await
        .map_err(|e| SiegeError::from_request_error(e, timeout_secs))?;

    let res = check_status(res, kind.to_string()).await?;

    Ok(res
        .json::<Value>()
        .await
        .map_err(|e| SiegeError::from_request_error(e, timeout_secs))?)
}

/// Fetch one player's ranked profile payload for a platform/board pair.
pub async fn get_player_stats(
    client: &Client,
    base_url: &str,
    headers: HeaderMap,
    name: &str,
    platform: Platform,
    board: Board,
    timeout_secs: u64,
) -> Result<Value> {
    let url = format!("{}/players/{}/{}", base_url, platform, name);
    let params = [("board", board.to_string())];
    debug!(%url, %board, "fetching player stats");

    let res = client
        .get(&url)
        .headers(headers)
        .query(&params)
        .send()
        .await
        .map_err(|e| SiegeError::from_request_error(e, timeout_secs))?;

    let res = check_status(res, name.to_string()).await?;

    Ok(res
        .json::<Value>()
        .await
        .map_err(|e| SiegeError::from_request_error(e, timeout_secs))?)
}

/// Map a non-2xx response to the right error kind: 404 means the item does
/// not exist, everything else is a fetch failure carrying the status.
async fn check_status(res: reqwest::Response, subject: String) -> Result<reqwest::Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(SiegeError::NotFound { name: subject });
    }

    let message = res.text().await.unwrap_or_default();
    Err(SiegeError::Fetch {
        status: status.as_u16(),
        message: if message.is_empty() {
            status.to_string()
        } else {
            message
        },
    })
}
