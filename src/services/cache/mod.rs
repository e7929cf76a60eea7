pub mod client;
pub mod valkey;

pub use client::{CacheClient, CacheError};
pub use valkey::ValkeyClient;

/// Convenience helper to build a TTL from seconds.
pub fn ttl_seconds(seconds: u64) -> std::time::Duration {
    std::time::Duration::from_secs(seconds)
}
