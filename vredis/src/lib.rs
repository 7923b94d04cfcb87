#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! # vredis
//!
//! Synchronous Redis sessions for request-processing workers of a caching
//! proxy.
//!
//! Each worker owns one [`Session`]. The session opens its connection lazily,
//! keeps it across requests and replaces it when it breaks. Commands and
//! replies never outlive the request they were built for: binding the
//! session to a new [`RequestId`] flushes both.
//!
//! `EVAL` commands are sent as `EVALSHA` with the script digest first. The
//! full script only goes over the wire when the server answers `NOSCRIPT`.
//!
//! ## Usage
//!
//! ```ignore
//! use vredis::{RequestId, Session, SharedConfig};
//! use vredis_redis::RedisConnector;
//!
//! let config = SharedConfig::default();
//! let mut session = Session::new(RedisConnector::new(), config.clone());
//!
//! // For every request served by this worker:
//! let mut redis = session.scope(RequestId::new(xid, slot));
//! redis.command("EVAL")?;
//! redis.push(Some("return redis.call('INCR', KEYS[1])"))?;
//! redis.push(Some("1"))?;
//! redis.push(Some("hits"))?;
//! redis.execute();
//! if redis.is_integer() {
//!     println!("hits: {}", redis.get_integer());
//! }
//!
//! // On worker shutdown:
//! session.close();
//! ```
//!
//! ## Feature Flags
//!
//! - `metrics` - record command, failure, script cache and connect counters
//!

/// Shared configuration handle.
///
/// [`SharedConfig`] publishes [`SessionConfig`] snapshots that can be swapped
/// atomically while sessions keep running.
pub mod config;

/// Connection lifecycle.
///
/// [`ConnectionManager`](connection::ConnectionManager) opens a connection on
/// first use and replaces it after a transport failure.
pub mod connection;

/// Execution protocol: the `EVALSHA` attempt, the `NOSCRIPT` fallback and
/// outcome classification.
pub mod execute;

/// Metrics collection for session observability.
///
/// When the `metrics` feature is enabled, this module records counters and
/// histograms for commands, failures, script cache outcomes and connects.
pub mod metrics;

/// Request-scoped command surface.
pub mod scope;

/// Per-worker session state and flush policy.
pub mod session;

pub use config::SharedConfig;
pub use scope::RequestScope;
pub use session::Session;

pub use vredis_core::{
    Command, CommandError, Connection, Connector, Error, MAX_COMMAND_ARGS, Reply, ReplyKind,
    RequestId, SessionConfig, digest,
};

/// The `vredis` prelude.
///
/// ```rust
/// use vredis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Connector, Reply, RequestId, Session, SharedConfig};
}
