//! Command execution protocol.
//!
//! [`run`] sends one command over a connection. `EVAL` commands are first
//! tried as `EVALSHA` with the script digest; only when the server answers
//! `NOSCRIPT` is the full script sent. [`report`] then classifies the result,
//! logs failures and yields the reply to store.

use smol_str::SmolStr;
use tracing::{error, trace};
use vredis_core::{Command, Connection, Error, Reply};

use crate::metrics::{self, FailureClass, ScriptCache, Timer};

/// How a command is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Try `EVAL` commands as `EVALSHA` first.
    ScriptCache,
    /// Send the command exactly as built.
    Verbatim,
}

/// Result of running one command, fallbacks included.
#[derive(Debug)]
pub struct Exchange {
    /// Verb of the last command actually sent.
    pub verb: SmolStr,
    /// Reply to that command, or why none was read.
    pub result: Result<Reply, Error>,
}

/// Sends `command` and returns the final exchange.
///
/// The command must have a verb. With [`Dispatch::ScriptCache`] at most two
/// round trips happen: `EVALSHA`, then `EVAL` after a `NOSCRIPT` reply.
pub fn run<C>(connection: &mut C, command: &Command, dispatch: Dispatch) -> Exchange
where
    C: Connection + ?Sized,
{
    let timer = Timer::new();
    let exchange = send(connection, command, dispatch);
    metrics::record_command(&exchange.verb, timer.elapsed());
    exchange
}

fn send<C>(connection: &mut C, command: &Command, dispatch: Dispatch) -> Exchange
where
    C: Connection + ?Sized,
{
    if dispatch == Dispatch::ScriptCache
        && let Some(evalsha) = command.to_evalsha()
    {
        match connection.send(&evalsha) {
            Ok(reply) if reply.is_noscript() => {
                trace!(target: "vredis", "script not cached on server, falling back to EVAL");
                metrics::record_script_cache(ScriptCache::NoScript);
            }
            result => {
                metrics::record_script_cache(ScriptCache::Hit);
                return Exchange {
                    verb: verb_of(&evalsha),
                    result,
                };
            }
        }
    }
    Exchange {
        verb: verb_of(command),
        result: connection.send(command),
    }
}

fn verb_of(command: &Command) -> SmolStr {
    command.verb().map(SmolStr::new).unwrap_or_default()
}

/// Logs the outcome of an exchange and returns the reply to store.
///
/// `broken` tells whether the connection flagged itself after the exchange.
/// Error replies are logged but still returned so callers can inspect them.
pub fn report(exchange: Exchange, broken: bool) -> Option<Reply> {
    let Exchange { verb, result } = exchange;
    match result {
        Err(err) if broken => {
            error!(target: "vredis", %verb, error = %err, "failed to execute Redis command");
            metrics::record_failure(FailureClass::Transport);
            None
        }
        Err(err) => {
            error!(target: "vredis", %verb, error = %err, "failed to execute Redis command, no reply");
            metrics::record_failure(FailureClass::NoReply);
            None
        }
        Ok(Reply::Error(message)) => {
            error!(target: "vredis", %verb, reply = %message, "got error reply while executing Redis command");
            metrics::record_failure(FailureClass::ErrorReply);
            Some(Reply::Error(message))
        }
        Ok(reply) => Some(reply),
    }
}
