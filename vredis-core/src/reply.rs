//! Server replies and their caller-facing views.
//!
//! A [`Reply`] is kept by the session until the next flush. Callers never
//! borrow it across requests: every accessor returns an owned copy
//! ([`SmolStr`] for text) so the value outlives the session state it came from.
//!
//! ## Views
//!
//! - [`Reply::text`] - scalar text of any reply (`"array"` for arrays, `None` for nil)
//! - [`Reply::len`] and [`Reply::element_text`] - one level of array access
//! - `as_*` getters - kind-specific projections that fall back on mismatch

use std::fmt;

use smol_str::SmolStr;

use crate::Raw;

/// Discriminant of a [`Reply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyKind {
    /// Error reply, e.g. `-ERR unknown command`.
    Error,
    /// Status reply, e.g. `+OK`.
    Status,
    /// Integer reply.
    Integer,
    /// Bulk string reply.
    String,
    /// Array reply.
    Array,
    /// Nil reply.
    Nil,
}

impl ReplyKind {
    /// Returns a static name, used as a log field and metrics label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplyKind::Error => "error",
            ReplyKind::Status => "status",
            ReplyKind::Integer => "integer",
            ReplyKind::String => "string",
            ReplyKind::Array => "array",
            ReplyKind::Nil => "nil",
        }
    }
}

impl fmt::Display for ReplyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reply received from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Error reply with its message.
    Error(SmolStr),
    /// Status reply with its message.
    Status(SmolStr),
    /// Integer reply.
    Integer(i64),
    /// Bulk string reply with its payload.
    String(Raw),
    /// Array reply.
    Array(Vec<Reply>),
    /// Nil reply.
    Nil,
}

impl Reply {
    /// Creates an error reply.
    pub fn error(message: impl Into<SmolStr>) -> Self {
        Reply::Error(message.into())
    }

    /// Creates a status reply.
    pub fn status(message: impl Into<SmolStr>) -> Self {
        Reply::Status(message.into())
    }

    /// Creates a bulk string reply.
    pub fn string(payload: impl Into<Raw>) -> Self {
        Reply::String(payload.into())
    }

    /// Returns the kind of this reply.
    pub fn kind(&self) -> ReplyKind {
        match self {
            Reply::Error(_) => ReplyKind::Error,
            Reply::Status(_) => ReplyKind::Status,
            Reply::Integer(_) => ReplyKind::Integer,
            Reply::String(_) => ReplyKind::String,
            Reply::Array(_) => ReplyKind::Array,
            Reply::Nil => ReplyKind::Nil,
        }
    }

    /// Returns `true` for an error reply starting with `NOSCRIPT`.
    ///
    /// Redis answers `EVALSHA` with this error when the script digest is
    /// not in its script cache.
    pub fn is_noscript(&self) -> bool {
        matches!(self, Reply::Error(message) if message.starts_with("NOSCRIPT"))
    }

    /// Scalar text view of the reply.
    ///
    /// Error, status and string replies yield their content, integers their
    /// decimal form and arrays the literal `"array"`. Nil yields `None`.
    pub fn text(&self) -> Option<SmolStr> {
        match self {
            Reply::Error(message) | Reply::Status(message) => Some(message.clone()),
            Reply::String(payload) => Some(SmolStr::new(String::from_utf8_lossy(payload))),
            Reply::Integer(value) => Some(SmolStr::new(value.to_string())),
            Reply::Array(_) => Some(SmolStr::new_static("array")),
            Reply::Nil => None,
        }
    }

    /// Number of elements of an array reply, 0 for anything else.
    pub fn len(&self) -> usize {
        match self {
            Reply::Array(elements) => elements.len(),
            _ => 0,
        }
    }

    /// Returns `true` unless this is a non-empty array.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the array element at `index`, if any.
    pub fn element(&self, index: usize) -> Option<&Reply> {
        match self {
            Reply::Array(elements) => elements.get(index),
            _ => None,
        }
    }

    /// Scalar text view of the array element at `index`.
    ///
    /// Out of range indexes and non-array replies yield `None`.
    pub fn element_text(&self, index: usize) -> Option<SmolStr> {
        self.element(index).and_then(Reply::text)
    }

    /// Error message, if this is an error reply.
    pub fn as_error(&self) -> Option<SmolStr> {
        match self {
            Reply::Error(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Status message, if this is a status reply.
    pub fn as_status(&self) -> Option<SmolStr> {
        match self {
            Reply::Status(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Integer value, or 0 for any other kind.
    pub fn as_integer(&self) -> i64 {
        match self {
            Reply::Integer(value) => *value,
            _ => 0,
        }
    }

    /// Bulk string payload as text, if this is a string reply.
    pub fn as_string(&self) -> Option<SmolStr> {
        match self {
            Reply::String(payload) => Some(SmolStr::new(String::from_utf8_lossy(payload))),
            _ => None,
        }
    }

    /// Raw bulk string payload, if this is a string reply.
    pub fn as_bytes(&self) -> Option<&Raw> {
        match self {
            Reply::String(payload) => Some(payload),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn array() -> Reply {
        Reply::Array(vec![
            Reply::Integer(-7),
            Reply::string("value"),
            Reply::Nil,
            Reply::Array(vec![Reply::Integer(1)]),
        ])
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(Reply::error("ERR boom").text().as_deref(), Some("ERR boom"));
        assert_eq!(Reply::status("OK").text().as_deref(), Some("OK"));
        assert_eq!(Reply::string("payload").text().as_deref(), Some("payload"));
        assert_eq!(Reply::Integer(42).text().as_deref(), Some("42"));
        assert_eq!(Reply::Integer(i64::MIN).text().as_deref(), Some("-9223372036854775808"));
        assert_eq!(array().text().as_deref(), Some("array"));
        assert_eq!(Reply::Nil.text(), None);
    }

    #[test]
    fn test_array_views() {
        let reply = array();
        assert_eq!(reply.len(), 4);
        assert_eq!(reply.element_text(0).as_deref(), Some("-7"));
        assert_eq!(reply.element_text(1).as_deref(), Some("value"));
        assert_eq!(reply.element_text(2), None);
        assert_eq!(reply.element_text(3).as_deref(), Some("array"));
        assert_eq!(reply.element_text(4), None);
    }

    #[test]
    fn test_array_views_on_scalars() {
        let reply = Reply::Integer(3);
        assert_eq!(reply.len(), 0);
        assert!(reply.is_empty());
        assert_eq!(reply.element_text(0), None);
    }

    #[test]
    fn test_typed_getters_fall_back() {
        let reply = Reply::status("QUEUED");
        assert_eq!(reply.as_status().as_deref(), Some("QUEUED"));
        assert_eq!(reply.as_error(), None);
        assert_eq!(reply.as_string(), None);
        assert_eq!(reply.as_integer(), 0);

        assert_eq!(Reply::Integer(12).as_integer(), 12);
        assert_eq!(Reply::string("x").as_bytes(), Some(&Raw::from_static(b"x")));
    }

    #[test]
    fn test_non_utf8_payload_is_lossy() {
        let reply = Reply::string(vec![b'o', b'k', 0xff]);
        assert_eq!(reply.text().as_deref(), Some("ok\u{fffd}"));
    }

    #[test]
    fn test_noscript() {
        assert!(Reply::error("NOSCRIPT No matching script. Please use EVAL.").is_noscript());
        assert!(!Reply::error("ERR NOSCRIPT").is_noscript());
        assert!(!Reply::status("NOSCRIPT").is_noscript());
    }

    #[test]
    fn test_kind() {
        assert_eq!(Reply::Nil.kind(), ReplyKind::Nil);
        assert_eq!(array().kind().to_string(), "array");
    }
}
