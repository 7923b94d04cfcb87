//! Per-worker session state.
//!
//! A [`Session`] belongs to exactly one worker and is never shared, so it
//! needs no locking. It keeps the worker's connection alive across requests,
//! while the pending command and the last reply are scoped to one request:
//! they are flushed whenever the session is bound to a different
//! [`RequestId`], so nothing built or read for one request is visible to the
//! next.
//!
//! ## Lifecycle
//!
//! 1. The worker creates the session once with [`Session::new`]
//! 2. For every call made while serving a request it enters a
//!    [`RequestScope`] with [`Session::scope`]
//! 3. On shutdown it calls [`Session::close`] (dropping has the same effect)

use tracing::{debug, trace, warn};
use vredis_core::{Command, CommandError, Connection, Connector, Reply, RequestId};

use crate::config::SharedConfig;
use crate::connection::ConnectionManager;
use crate::execute::{self, Dispatch};
use crate::scope::RequestScope;

/// Connection, pending command and last reply of one worker.
pub struct Session<C: Connector> {
    connections: ConnectionManager<C>,
    config: SharedConfig,
    command: Command,
    reply: Option<Reply>,
    request: Option<RequestId>,
}

impl<C: Connector> Session<C> {
    /// Creates a session. No connection is opened until the first command runs.
    pub fn new(connector: C, config: SharedConfig) -> Self {
        Self {
            connections: ConnectionManager::new(connector),
            config,
            command: Command::new(),
            reply: None,
            request: None,
        }
    }

    /// Binds the session to `request` and returns a handle for it.
    pub fn scope(&mut self, request: RequestId) -> RequestScope<'_, C> {
        self.bind(request);
        RequestScope::new(self)
    }

    /// Records `request` as the one being served.
    ///
    /// A different request than the last one flushes the pending command and
    /// reply first. Returns `true` in that case.
    pub fn bind(&mut self, request: RequestId) -> bool {
        if self.request == Some(request) {
            return false;
        }
        trace!(target: "vredis", %request, "new request, flushing session");
        self.flush();
        self.request = Some(request);
        true
    }

    /// Request the session is currently bound to.
    pub fn request(&self) -> Option<RequestId> {
        self.request
    }

    /// Releases the pending command and the stored reply.
    ///
    /// The connection is kept.
    pub fn flush(&mut self) {
        self.command.clear();
        self.reply = None;
    }

    /// Flushes the session and starts a new command.
    ///
    /// An empty name is logged and rejected without touching the session.
    pub fn start_command(&mut self, name: &str) -> Result<(), CommandError> {
        if name.is_empty() {
            warn!(target: "vredis", "failed to start Redis command: empty name");
            return Err(CommandError::EmptyName);
        }
        self.flush();
        self.command.start(name)
    }

    /// Appends an argument to the pending command.
    ///
    /// `None` is pushed as an empty string. Pushing without a started command
    /// or past the argument limit is logged and rejected; the command is left
    /// as it was.
    pub fn push_argument(&mut self, value: Option<&str>) -> Result<(), CommandError> {
        self.command
            .push(value.unwrap_or_default())
            .inspect_err(|err| warn!(target: "vredis", error = %err, "failed to push Redis argument"))
    }

    /// The pending command.
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// Runs the pending command and stores its reply.
    ///
    /// Does nothing when no command was started. Failures are logged and
    /// leave no reply behind; error replies are stored like any other reply.
    pub fn execute(&mut self) -> Option<&Reply> {
        if self.command.is_empty() {
            warn!(target: "vredis", "no Redis command started, execute ignored");
            return None;
        }
        self.reply = dispatch(
            &mut self.connections,
            &self.config,
            &self.command,
            Dispatch::ScriptCache,
        );
        self.reply.as_ref()
    }

    /// Flushes the session and runs a whitespace separated command line.
    ///
    /// The line is sent as is, without the `EVALSHA` optimization, and is not
    /// kept as the pending command. Blank lines do nothing.
    pub fn call(&mut self, line: &str) -> Option<&Reply> {
        self.flush();
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return None,
            Err(err) => {
                warn!(target: "vredis", error = %err, "failed to parse Redis command line");
                return None;
            }
        };
        self.reply = dispatch(
            &mut self.connections,
            &self.config,
            &command,
            Dispatch::Verbatim,
        );
        self.reply.as_ref()
    }

    /// The reply of the last executed command, if any.
    pub fn reply(&self) -> Option<&Reply> {
        self.reply.as_ref()
    }

    /// Shared configuration this session connects with.
    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Returns `true` while the session holds a connection.
    pub fn is_connected(&self) -> bool {
        self.connections.is_connected()
    }

    /// The connector used to open connections.
    pub fn connector(&self) -> &C {
        self.connections.connector()
    }

    /// Releases the connection, the pending command and the reply.
    pub fn close(mut self) {
        self.flush();
        self.connections.discard();
        debug!(target: "vredis", "session closed");
    }
}

fn dispatch<C: Connector>(
    connections: &mut ConnectionManager<C>,
    config: &SharedConfig,
    command: &Command,
    mode: Dispatch,
) -> Option<Reply> {
    let snapshot = config.load();
    // Connect failures are already logged by the manager.
    let connection = connections.get(&snapshot.config).ok()?;
    let exchange = execute::run(connection, command, mode);
    execute::report(exchange, connection.is_broken())
}
