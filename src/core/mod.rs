//! Core infrastructure shared across the library.

pub mod cache;
pub mod http;

pub use cache::{
    try_read_to_string, write_string, CacheKey, CacheManager, ReferenceCacheKey, ReferenceKind,
    TimedCache, TimedEntry, REFERENCE_TTL,
};
pub use http::{build_client, maybe_auth_header_map, DEFAULT_TIMEOUT_SECS};
