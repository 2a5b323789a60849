//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Short-lived, namespaced key/value cache.
///
/// Used for two key families: `slug:{slug}` (registry descriptors) and
/// `redirect:{path}` (fully resolved redirect targets), both serialized as
/// JSON with a 4-hour default TTL.
///
/// Implementations must be thread-safe and fail open: a cache failure
/// degrades to a registry lookup, never to a failed request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a cached value.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value with optional TTL override.
    ///
    /// `ttl_seconds = None` applies the implementation's default TTL.
    /// Implementations log errors and return `Ok(())` so the request flow
    /// is never disrupted.
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Removes a cached value. Used when a slug is assigned or renamed.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
