//! Shared, swappable session configuration.
//!
//! Every worker's session reads the same [`SharedConfig`]. Replacing it swaps
//! an `Arc` atomically: a session that is in the middle of connecting keeps
//! the snapshot it loaded, and the old configuration is freed once the last
//! such reader drops it.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::debug;
use vredis_core::SessionConfig;

/// A configuration snapshot tagged with the version it was published as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned {
    /// Monotonic version, starting at 0 for the initial configuration.
    pub version: u64,
    /// The configuration itself.
    pub config: SessionConfig,
}

/// Cloneable handle to the current [`SessionConfig`].
///
/// # Example
///
/// ```
/// use vredis::SharedConfig;
///
/// let shared = SharedConfig::default();
/// assert_eq!(shared.load().config.port(), 6379);
///
/// let version = shared.configure("10.0.0.7", 6380, 250);
/// assert_eq!(version, 1);
/// assert_eq!(shared.load().config.addr(), "10.0.0.7:6380");
/// ```
#[derive(Clone)]
pub struct SharedConfig {
    current: Arc<ArcSwap<Versioned>>,
}

impl SharedConfig {
    /// Creates a handle publishing `config` as version 0.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(Versioned { version: 0, config })),
        }
    }

    /// Returns the current snapshot.
    pub fn load(&self) -> Arc<Versioned> {
        self.current.load_full()
    }

    /// Returns the current version.
    pub fn version(&self) -> u64 {
        self.current.load().version
    }

    /// Publishes a new configuration and returns its version.
    ///
    /// Connections that are already open keep running against the endpoint
    /// they were opened with; only new connections see the change.
    pub fn replace(&self, config: SessionConfig) -> u64 {
        let previous = self.current.rcu(|current| Versioned {
            version: current.version + 1,
            config: config.clone(),
        });
        let version = previous.version + 1;
        debug!(target: "vredis", version, %config, "session configuration replaced");
        version
    }

    /// Publishes a configuration built from a host, port and millisecond timeout.
    pub fn configure(&self, host: &str, port: u16, timeout_ms: u64) -> u64 {
        self.replace(SessionConfig::from_millis(host, port, timeout_ms))
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl From<SessionConfig> for SharedConfig {
    fn from(config: SessionConfig) -> Self {
        Self::new(config)
    }
}

impl fmt::Debug for SharedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.current.load();
        f.debug_struct("SharedConfig")
            .field("version", &current.version)
            .field("config", &current.config)
            .finish()
    }
}
