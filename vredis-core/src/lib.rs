#![warn(missing_docs)]
//! # vredis-core
//!
//! Core types and traits for per-worker Redis sessions.
//!
//! This crate holds everything in vredis that doesn't need a network:
//! the reply model, the pending command buffer, script digests, request
//! identity and the transport traits. The session engine lives in `vredis`
//! and the production transport lives in `vredis-redis`.
//!
//! ## Architecture
//!
//! A worker owns one session. For every request it serves, the worker builds
//! a command incrementally, executes it and reads the reply. This crate
//! provides the building blocks the session uses to:
//!
//! - **Build** commands ([`Command`])
//! - **Represent** server replies ([`Reply`], [`ReplyKind`])
//! - **Fingerprint** Lua scripts for `EVALSHA` ([`digest()`])
//! - **Identify** the request a session is bound to ([`RequestId`])
//! - **Talk** to a server ([`Connector`], [`Connection`])
//!

pub mod command;
pub mod config;
pub mod digest;
pub mod error;
pub mod reply;
pub mod request;
pub mod transport;

pub use command::{Command, MAX_COMMAND_ARGS};
pub use config::SessionConfig;
pub use digest::digest;
pub use error::{CommandError, Error};
pub use reply::{Reply, ReplyKind};
pub use request::RequestId;
#[doc(hidden)]
pub use smol_str::SmolStr;
pub use transport::{Connection, Connector};

/// Raw byte payload of bulk string replies.
/// Using `Bytes` keeps clones of a stored reply cheap.
pub type Raw = bytes::Bytes;
