//! Error taxonomy for Redis sessions.
//!
//! None of these errors ever escape a session as a panic. Connection and
//! transport failures cause the connection to be discarded, server errors are
//! kept as the stored [`Reply::Error`], and usage errors leave the session
//! untouched. All of them are logged where they happen.
//!
//! [`Reply::Error`]: crate::Reply::Error

use thiserror::Error;

/// Boxed source error coming from a transport implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while running a command.
#[derive(Debug, Error)]
pub enum Error {
    /// A connection to the configured endpoint could not be established.
    #[error("failed to establish Redis connection to {addr}: {source}")]
    Config {
        /// `host:port` the session tried to reach.
        addr: String,
        /// Underlying transport failure.
        #[source]
        source: BoxError,
    },

    /// I/O failure on an established connection.
    ///
    /// The connection that produced it is flagged broken and will be
    /// replaced on next use.
    #[error(transparent)]
    Transport(BoxError),

    /// The server answered with an error reply.
    #[error("error reply: {message}")]
    Protocol {
        /// Error message as sent by the server, e.g. `NOSCRIPT No matching script`.
        message: String,
    },

    /// The caller misused the command builder.
    #[error(transparent)]
    Usage(#[from] CommandError),
}

impl Error {
    /// Wraps any transport failure.
    pub fn transport(error: impl Into<BoxError>) -> Self {
        Error::Transport(error.into())
    }
}

/// Misuse of the incremental command builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command name was empty.
    #[error("command name must not be empty")]
    EmptyName,

    /// An argument was pushed before a command name was set.
    #[error("no command started, push ignored")]
    MissingVerb,

    /// The command already holds the maximum number of entries.
    #[error("command is full ({max} entries), push ignored")]
    Capacity {
        /// Maximum number of entries, verb included.
        max: usize,
    },
}
