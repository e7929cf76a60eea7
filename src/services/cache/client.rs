//! Cache client interface used by higher-level code (business profile cache, etc.).
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache-layer errors (transport/command/serialization).
///
/// Not:
/// - We keep this independent from `AppError` so callers can decide how to fail
/// (fail-open for the profile cache, fail-closed if auth ever depends on it).
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    BackendConnection(String),
    #[error("cache command error: {0}")]
    BackendCommand(String),
    #[error("cache value error: {0}")]
    InvalidValue(String),
}

/// A minimal cache interface.
///
/// This is intentionally small and string-based:
/// - The business profile cache only needs `GET` / `SET EX` / `DEL`
///   (invalidation is key deletion, nothing smarter).
/// - Other features can add methods later, but keep the surface area small.
///
/// Object-safe on purpose: `AppState` stores `Arc<dyn CacheClient>` so tests
/// can swap in an in-memory impl.
#[async_trait]
pub trait CacheClient: Send + Sync {
    // Returns the cache backend name (for logging/metrics).
    fn backend_name(&self) -> &'static str;

    // Get UTF-8 string value.
    async fn get_string(&self, key: &str) -> CacheResult<Option<String>>;

    // Set value with TTL, overwriting any existing entry.
    async fn set_string_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    // Delete a key. Returns number of deleted keys.
    async fn del(&self, key: &str) -> CacheResult<u64>;
}
