//! Blocking connector and connection based on redis-rs.

use std::time::Duration;

use redis::{Client, RedisError, Value};
use tracing::trace;
use vredis_core::{Command, Connection, Connector, Reply, SessionConfig};

use crate::error::Error;

/// Opens synchronous redis-rs connections.
///
/// The connector holds no state: every [`connect`](Connector::connect) call
/// builds a fresh [`Client`] from the configuration snapshot it is given, so
/// a replaced configuration is picked up by the next connection.
///
/// # Examples
///
/// ```no_run
/// use vredis_core::{Connector, SessionConfig};
/// use vredis_redis::RedisConnector;
///
/// let connection = RedisConnector::new()
///     .connect(&SessionConfig::from_millis("127.0.0.1", 6379, 500));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RedisConnector;

impl RedisConnector {
    /// Creates a connector.
    pub fn new() -> Self {
        Self
    }
}

fn connection_url(config: &SessionConfig) -> String {
    let host = config.host();
    if host.contains(':') {
        format!("redis://[{}]:{}/", host, config.port())
    } else {
        format!("redis://{}:{}/", host, config.port())
    }
}

fn connect_error(config: &SessionConfig, error: RedisError) -> vredis_core::Error {
    vredis_core::Error::Config {
        addr: config.addr(),
        source: Box::new(Error::from(error)),
    }
}

impl Connector for RedisConnector {
    type Connection = RedisConnection;

    fn connect(&self, config: &SessionConfig) -> Result<RedisConnection, vredis_core::Error> {
        trace!(target: "vredis", addr = %config.addr(), "opening Redis connection");
        let client =
            Client::open(connection_url(config)).map_err(|err| connect_error(config, err))?;
        // Zero disables the timeout.
        let timeout = Some(config.timeout()).filter(|timeout| !timeout.is_zero());
        let inner = match timeout {
            Some(timeout) => client.get_connection_with_timeout(timeout),
            None => client.get_connection(),
        }
        .map_err(|err| connect_error(config, err))?;
        set_timeouts(&inner, timeout).map_err(|err| connect_error(config, err))?;
        Ok(RedisConnection {
            inner,
            broken: false,
        })
    }
}

fn set_timeouts(connection: &redis::Connection, timeout: Option<Duration>) -> Result<(), RedisError> {
    connection.set_read_timeout(timeout)?;
    connection.set_write_timeout(timeout)
}

/// A blocking connection opened by [`RedisConnector`].
pub struct RedisConnection {
    inner: redis::Connection,
    broken: bool,
}

impl RedisConnection {
    fn query(&mut self, command: &Command) -> Result<Value, RedisError> {
        // Verb-less commands are rejected by the caller.
        let mut cmd = redis::cmd(command.verb().unwrap_or_default());
        for argument in command.arguments() {
            cmd.arg(argument.as_str());
        }
        cmd.query(&mut self.inner)
    }
}

impl Connection for RedisConnection {
    fn send(&mut self, command: &Command) -> Result<Reply, vredis_core::Error> {
        if command.verb().is_none() {
            return Err(vredis_core::Error::Protocol {
                message: "command has no verb".to_owned(),
            });
        }
        match self.query(command) {
            Ok(value) => Ok(reply_from_value(value)),
            Err(error) => match error.code() {
                Some(code) => Ok(Reply::error(error_text(code, error.detail()))),
                None => {
                    self.broken = true;
                    Err(Error::from(error).into())
                }
            },
        }
    }

    fn is_broken(&self) -> bool {
        self.broken
    }
}

fn error_text(code: &str, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{code} {detail}"),
        None => code.to_owned(),
    }
}

/// Converts a raw redis-rs value into a [`Reply`].
///
/// RESP3 types without a RESP2 counterpart are folded into the closest
/// reply kind: maps become flat key/value arrays, sets become arrays, doubles
/// and verbatim strings become strings and booleans become 0 or 1.
/// Anything else is [`Reply::Nil`].
pub fn reply_from_value(value: Value) -> Reply {
    match value {
        Value::Nil => Reply::Nil,
        Value::Int(value) => Reply::Integer(value),
        Value::BulkString(payload) => Reply::string(payload),
        Value::SimpleString(status) => Reply::status(status),
        Value::Okay => Reply::status("OK"),
        Value::Array(items) | Value::Set(items) => {
            Reply::Array(items.into_iter().map(reply_from_value).collect())
        }
        Value::Map(pairs) => Reply::Array(
            pairs
                .into_iter()
                .flat_map(|(key, value)| [key, value])
                .map(reply_from_value)
                .collect(),
        ),
        Value::Double(value) => Reply::string(value.to_string()),
        Value::Boolean(value) => Reply::Integer(i64::from(value)),
        Value::VerbatimString { text, .. } => Reply::string(text),
        Value::ServerError(error) => Reply::error(error_text(error.code(), error.details())),
        _ => Reply::Nil,
    }
}
