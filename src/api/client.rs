//! Client owning the HTTP connection and the reference-data cache.

use std::path::Path;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::api::http::{
    get_player_stats, get_reference_data, REFERENCE_BASE_URL, STATS_BASE_URL,
};
use crate::core::cache::{CacheManager, ReferenceCacheKey, ReferenceKind, TimedCache, REFERENCE_TTL};
use crate::core::http::{build_client, default_header_map, maybe_auth_header_map, DEFAULT_TIMEOUT_SECS};
use crate::error::{Result, SiegeError};
use crate::model::{Board, Map, Operator, Platform, PlayerRankedProfile, Weapon};

/// Client for both data sources, with a timed cache per reference kind.
///
/// Reference loads check the cache first: data younger than 30 minutes
/// fetched under the same filter set is returned without a network call.
/// Player profile lookups are never cached; each comparison consumes a
/// fresh snapshot.
pub struct SiegeClient {
    http: reqwest::Client,
    cache: CacheManager,
    reference_base: String,
    stats_base: String,
    timeout: Duration,
}

impl SiegeClient {
    /// Create a client with the default endpoints and timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client honoring a caller-supplied timeout budget.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::with_base_urls(REFERENCE_BASE_URL, STATS_BASE_URL, timeout)
    }

    /// Create a client against custom endpoints (also used by tests).
    pub fn with_base_urls(reference_base: &str, stats_base: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: build_client(timeout)?,
            cache: CacheManager::new(),
            reference_base: reference_base.trim_end_matches('/').to_string(),
            stats_base: stats_base.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Redirect the disk cache tier to `dir` instead of the default cache
    /// directory. Tests point this at a temporary directory so runs never
    /// write under the user's cache.
    pub fn with_cache_dir(mut self, dir: &Path) -> Self {
        self.cache = CacheManager::with_base_dir(dir.to_path_buf());
        self
    }

    fn headers(&self) -> Result<HeaderMap> {
        Ok(maybe_auth_header_map()?.unwrap_or_else(default_header_map))
    }

    /// Load the operator collection, unfiltered.
    pub async fn load_operators(&self) -> Result<Vec<Operator>> {
        self.load_operators_filtered(&[]).await
    }

    /// Load operators fetched under a server-side filter set.
    pub async fn load_operators_filtered(
        &self,
        filters: &[(String, String)],
    ) -> Result<Vec<Operator>> {
        self.load_reference(&self.cache.operators, ReferenceKind::Operators, filters)
            .await
    }

    /// Load the weapon collection, unfiltered.
    pub async fn load_weapons(&self) -> Result<Vec<Weapon>> {
        self.load_weapons_filtered(&[]).await
    }

    pub async fn load_weapons_filtered(&self, filters: &[(String, String)]) -> Result<Vec<Weapon>> {
        self.load_reference(&self.cache.weapons, ReferenceKind::Weapons, filters)
            .await
    }

    /// Load the map collection, unfiltered.
    pub async fn load_maps(&self) -> Result<Vec<Map>> {
        self.load_maps_filtered(&[]).await
    }

    pub async fn load_maps_filtered(&self, filters: &[(String, String)]) -> Result<Vec<Map>> {
        self.load_reference(&self.cache.maps, ReferenceKind::Maps, filters)
            .await
    }

    /// Cache-then-fetch for one reference collection.
    ///
    /// A hit requires both a fresh timestamp and an identical filter set;
    /// anything else refetches and replaces the entry. Fetch errors
    /// propagate typed with no automatic retry.
    async fn load_reference<T>(
        &self,
        cache: &TimedCache<ReferenceCacheKey, Vec<T>>,
        kind: ReferenceKind,
        filters: &[(String, String)],
    ) -> Result<Vec<T>>
    where
        T: Clone + Serialize + DeserializeOwned,
    {
        let key = ReferenceCacheKey {
            kind,
            filters: filters.to_vec(),
        };

        if let Some(cached) = cache.get(&key, REFERENCE_TTL) {
            return Ok(cached);
        }

        let raw = get_reference_data(
            &self.http,
            &self.reference_base,
            self.headers()?,
            kind,
            filters,
            self.timeout.as_secs(),
        )
        .await?;

        if !raw.is_array() {
            return Err(SiegeError::MissingInput {
                what: match kind {
                    ReferenceKind::Operators => "operators payload",
                    ReferenceKind::Weapons => "weapons payload",
                    ReferenceKind::Maps => "maps payload",
                },
            });
        }

        let parsed: Vec<T> = serde_json::from_value(raw)?;
        debug!(%kind, count = parsed.len(), "reference data fetched");
        cache.put(key, parsed.clone());

        Ok(parsed)
    }

    /// Fetch one player's ranked profile.
    ///
    /// A 404 surfaces as `NotFound`; a present player with a null stats
    /// payload surfaces as `InsufficientData` so the scorer never sees a
    /// zero-filled profile.
    pub async fn get_player_profile(
        &self,
        name: &str,
        platform: Platform,
        board: Board,
    ) -> Result<PlayerRankedProfile> {
        let raw = get_player_stats(
            &self.http,
            &self.stats_base,
            self.headers()?,
            name,
            platform,
            board,
            self.timeout.as_secs(),
        )
        .await?;

        if raw.is_null() {
            return Err(SiegeError::InsufficientData {
                message: format!("{} has no ranked profile", name),
            });
        }

        Ok(serde_json::from_value(raw)?)
    }

    /// Fetch two players' profiles concurrently; both must resolve before a
    /// comparison can be scored.
    pub async fn get_two_player_profiles(
        &self,
        name1: &str,
        name2: &str,
        platform: Platform,
        board: Board,
    ) -> Result<(PlayerRankedProfile, PlayerRankedProfile)> {
        tokio::try_join!(
            self.get_player_profile(name1, platform, board),
            self.get_player_profile(name2, platform, board),
        )
    }

    /// Drop all in-memory cached reference data.
    pub fn clear_cache(&self) {
        self.cache.clear_all_memory();
    }
}

#[cfg(test)]
mod tests;
