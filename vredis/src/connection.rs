//! Lazy, self-healing connection holder.

use tracing::{debug, error};
use vredis_core::{Connection, Connector, Error, SessionConfig};

use crate::metrics;

/// Owns at most one connection and replaces it when it breaks.
///
/// The connection is opened on first use. A connection that reported a
/// transport failure is dropped on the next [`get`](ConnectionManager::get)
/// and a fresh one is opened in its place. There is at most one connect
/// attempt per call and no retry loop: if it fails, the next call tries again.
pub struct ConnectionManager<C: Connector> {
    connector: C,
    connection: Option<C::Connection>,
}

impl<C: Connector> ConnectionManager<C> {
    /// Creates a manager that opens connections through `connector`.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            connection: None,
        }
    }

    /// Returns a healthy connection, opening one if needed.
    ///
    /// Connect failures are logged here and returned as [`Error::Config`];
    /// the manager is left without a connection.
    pub fn get(&mut self, config: &SessionConfig) -> Result<&mut C::Connection, Error> {
        let connection = match self.connection.take() {
            Some(connection) if !connection.is_broken() => connection,
            Some(broken) => {
                debug!(target: "vredis", "discarding broken Redis connection");
                drop(broken);
                self.connect(config)?
            }
            None => self.connect(config)?,
        };
        Ok(self.connection.insert(connection))
    }

    fn connect(&self, config: &SessionConfig) -> Result<C::Connection, Error> {
        let result = self
            .connector
            .connect(config)
            .and_then(|connection| {
                if connection.is_broken() {
                    Err(Error::Config {
                        addr: config.addr(),
                        source: "connection reported an error right after connect".into(),
                    })
                } else {
                    Ok(connection)
                }
            });
        match &result {
            Ok(_) => {
                debug!(target: "vredis", addr = %config.addr(), "Redis connection established");
            }
            Err(err) => {
                error!(target: "vredis", addr = %config.addr(), error = %err, "failed to establish Redis connection");
            }
        }
        metrics::record_connect(result.is_ok());
        result
    }

    /// Returns `true` while a connection is held, broken or not.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Drops the current connection, if any.
    pub fn discard(&mut self) {
        if self.connection.take().is_some() {
            debug!(target: "vredis", "Redis connection released");
        }
    }

    /// Returns the connector.
    pub fn connector(&self) -> &C {
        &self.connector
    }
}
