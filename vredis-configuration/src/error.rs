//! Configuration loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML or doesn't match the expected shape.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// The Redis host is empty.
    #[error("redis.host must not be empty")]
    EmptyHost,

    /// The Redis port is 0.
    #[error("redis.port must be between 1 and 65535")]
    InvalidPort,
}
