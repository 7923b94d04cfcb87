//! Transport traits.
//!
//! The session engine doesn't know how bytes reach Redis. It asks a
//! [`Connector`] for a [`Connection`] and sends [`Command`]s over it.
//! `vredis-redis` provides the production implementation; tests plug in
//! scripted transports.

use crate::{Command, Error, Reply, SessionConfig};

/// Opens connections to the endpoint described by a [`SessionConfig`].
pub trait Connector {
    /// Connection type produced by this connector.
    type Connection: Connection;

    /// Opens a new connection.
    ///
    /// Failures are reported as [`Error::Config`].
    fn connect(&self, config: &SessionConfig) -> Result<Self::Connection, Error>;
}

/// A live connection to one Redis endpoint.
///
/// Once a connection reports [`is_broken`](Connection::is_broken) it is never
/// used again; the session drops it and opens a new one.
pub trait Connection {
    /// Sends one command and waits for its reply.
    ///
    /// Server error replies are returned as `Ok(Reply::Error(..))`. An `Err`
    /// means no reply was read; if the failure is an I/O one the connection
    /// also flags itself broken.
    fn send(&mut self, command: &Command) -> Result<Reply, Error>;

    /// Returns `true` once the connection hit a transport failure.
    fn is_broken(&self) -> bool;
}

impl<T> Connector for &T
where
    T: Connector + ?Sized,
{
    type Connection = T::Connection;

    fn connect(&self, config: &SessionConfig) -> Result<Self::Connection, Error> {
        (**self).connect(config)
    }
}
