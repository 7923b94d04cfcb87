//! Error types for the Redis transport.
//!
//! All errors are converted to [`vredis_core::Error`] before they reach the
//! session, so callers rarely match on this type directly.

use redis::RedisError;

/// Error type for Redis transport operations.
///
/// Wraps errors from the underlying [`redis`] crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error from the underlying Redis client.
    ///
    /// This includes connection failures, timeouts and protocol errors.
    /// Server error replies never end up here.
    #[error("Redis transport error: {0}")]
    Redis(#[from] RedisError),
}

impl From<Error> for vredis_core::Error {
    fn from(error: Error) -> Self {
        Self::transport(error)
    }
}
