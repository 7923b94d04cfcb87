//! Connection settings for a Redis endpoint.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 6379;
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// Where and how a session connects.
///
/// Sessions only ever read a configuration. Changing settings means building
/// a new value and swapping it in as a whole.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use vredis_core::SessionConfig;
///
/// let config = SessionConfig::from_millis("10.0.0.5", 6380, 1250);
/// assert_eq!(config.addr(), "10.0.0.5:6380");
/// assert_eq!(config.timeout(), Duration::from_millis(1250));
/// assert_eq!(config.timeout_parts(), (1, 250_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_host")]
    host: SmolStr,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    timeout: Duration,
}

fn default_host() -> SmolStr {
    SmolStr::new_static(DEFAULT_HOST)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SessionConfig {
    /// Creates a configuration.
    pub fn new(host: impl Into<SmolStr>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    /// Creates a configuration with a timeout given in milliseconds.
    pub fn from_millis(host: impl Into<SmolStr>, port: u16, timeout_ms: u64) -> Self {
        Self::new(host, port, Duration::from_millis(timeout_ms))
    }

    /// Server host name or address.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Server port.
    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Connect, read and write timeout. Zero means no timeout.
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Timeout split into whole seconds and remaining microseconds.
    pub fn timeout_parts(&self) -> (u64, u32) {
        (self.timeout.as_secs(), self.timeout.subsec_micros())
    }

    /// Returns `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} (timeout {}ms)",
            self.host,
            self.port,
            self.timeout.as_millis()
        )
    }
}
