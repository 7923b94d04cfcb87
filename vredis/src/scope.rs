//! Request-scoped command surface.

use smol_str::SmolStr;
use vredis_core::{CommandError, Connector, Reply, ReplyKind};

use crate::session::Session;

/// A [`Session`] bound to the request currently being served.
///
/// Obtained from [`Session::scope`]. All accessors return owned values, so
/// nothing read through a scope borrows from the session after the scope
/// ends. When nothing was executed, or execution failed, every `is_*`
/// predicate is `false` and every getter returns its fallback.
///
/// # Example
///
/// ```ignore
/// let mut redis = session.scope(RequestId::new(xid, slot));
/// redis.command("INCRBY")?;
/// redis.push(Some("hits"))?;
/// redis.push(Some("1"))?;
/// redis.execute();
/// let hits = redis.get_integer();
/// ```
pub struct RequestScope<'a, C: Connector> {
    session: &'a mut Session<C>,
}

impl<'a, C: Connector> RequestScope<'a, C> {
    pub(crate) fn new(session: &'a mut Session<C>) -> Self {
        Self { session }
    }

    /// Publishes a new endpoint for connections opened from now on.
    pub fn configure(&self, host: &str, port: u16, timeout_ms: u64) -> u64 {
        self.session.config().configure(host, port, timeout_ms)
    }

    /// Starts a new command, dropping any pending command and reply.
    pub fn command(&mut self, name: &str) -> Result<(), CommandError> {
        self.session.start_command(name)
    }

    /// Appends an argument; `None` becomes an empty string.
    pub fn push(&mut self, value: Option<&str>) -> Result<(), CommandError> {
        self.session.push_argument(value)
    }

    /// Runs the pending command.
    pub fn execute(&mut self) -> Option<&Reply> {
        self.session.execute()
    }

    /// Runs a whitespace separated command line.
    pub fn call(&mut self, line: &str) -> Option<&Reply> {
        self.session.call(line)
    }

    /// Drops the pending command and reply early.
    pub fn free(&mut self) {
        self.session.flush();
    }

    /// The stored reply, if any.
    pub fn reply(&self) -> Option<&Reply> {
        self.session.reply()
    }

    fn is_kind(&self, kind: ReplyKind) -> bool {
        self.reply().is_some_and(|reply| reply.kind() == kind)
    }

    /// `true` if the stored reply is an error.
    pub fn is_error(&self) -> bool {
        self.is_kind(ReplyKind::Error)
    }

    /// `true` if the stored reply is nil.
    pub fn is_nil(&self) -> bool {
        self.is_kind(ReplyKind::Nil)
    }

    /// `true` if the stored reply is a status.
    pub fn is_status(&self) -> bool {
        self.is_kind(ReplyKind::Status)
    }

    /// `true` if the stored reply is an integer.
    pub fn is_integer(&self) -> bool {
        self.is_kind(ReplyKind::Integer)
    }

    /// `true` if the stored reply is a bulk string.
    pub fn is_string(&self) -> bool {
        self.is_kind(ReplyKind::String)
    }

    /// `true` if the stored reply is an array.
    pub fn is_array(&self) -> bool {
        self.is_kind(ReplyKind::Array)
    }

    /// Scalar text of the stored reply.
    pub fn get_reply(&self) -> Option<SmolStr> {
        self.reply().and_then(Reply::text)
    }

    /// Error message of the stored reply.
    pub fn get_error(&self) -> Option<SmolStr> {
        self.reply().and_then(Reply::as_error)
    }

    /// Status message of the stored reply.
    pub fn get_status(&self) -> Option<SmolStr> {
        self.reply().and_then(Reply::as_status)
    }

    /// Integer value of the stored reply, 0 when it isn't one.
    pub fn get_integer(&self) -> i64 {
        self.reply().map(Reply::as_integer).unwrap_or_default()
    }

    /// Bulk string payload of the stored reply as text.
    pub fn get_string(&self) -> Option<SmolStr> {
        self.reply().and_then(Reply::as_string)
    }

    /// Number of elements of the stored array reply, 0 otherwise.
    pub fn get_array_length(&self) -> usize {
        self.reply().map(Reply::len).unwrap_or_default()
    }

    /// Scalar text of the element at `index` of the stored array reply.
    pub fn get_array_value(&self, index: usize) -> Option<SmolStr> {
        self.reply().and_then(|reply| reply.element_text(index))
    }
}
