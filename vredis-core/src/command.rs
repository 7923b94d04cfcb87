//! Pending command buffer.
//!
//! A [`Command`] is built incrementally: the verb is set first with
//! [`Command::start`], then arguments are appended one by one with
//! [`Command::push`]. The buffer never holds more than [`MAX_COMMAND_ARGS`]
//! entries and rejects pushes that would exceed it instead of truncating.
//!
//! ```
//! use vredis_core::Command;
//!
//! let mut command = Command::new();
//! command.start("set").unwrap();
//! command.push("key").unwrap();
//! command.push("value").unwrap();
//!
//! assert_eq!(command.verb(), Some("SET"));
//! assert_eq!(command.arguments(), ["key", "value"]);
//! ```

use std::fmt;

use crate::digest::digest;
use crate::error::CommandError;

/// Maximum number of entries in a command, verb included.
pub const MAX_COMMAND_ARGS: usize = 128;

const EVAL: &str = "EVAL";
const EVALSHA: &str = "EVALSHA";

/// An ordered command: verb at index 0, then its arguments.
///
/// An empty command has no verb and accepts no arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    parts: Vec<String>,
}

impl Command {
    /// Creates an empty command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards whatever the buffer holds and starts a new command.
    ///
    /// The name is uppercased so verbs compare case-insensitively.
    /// An empty name is rejected and leaves the buffer unchanged.
    pub fn start(&mut self, name: &str) -> Result<(), CommandError> {
        if name.is_empty() {
            return Err(CommandError::EmptyName);
        }
        self.parts.clear();
        self.parts.push(name.to_ascii_uppercase());
        Ok(())
    }

    /// Appends an argument.
    ///
    /// Fails without touching the buffer when no verb is set or when the
    /// command is already full.
    pub fn push(&mut self, value: impl Into<String>) -> Result<(), CommandError> {
        if self.parts.is_empty() {
            return Err(CommandError::MissingVerb);
        }
        if self.parts.len() >= MAX_COMMAND_ARGS {
            return Err(CommandError::Capacity {
                max: MAX_COMMAND_ARGS,
            });
        }
        self.parts.push(value.into());
        Ok(())
    }

    /// Builds a command from a whitespace separated line, e.g. `"GET key"`.
    ///
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut tokens = line.split_ascii_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(None);
        };
        let mut command = Command::new();
        command.start(name)?;
        for token in tokens {
            command.push(token)?;
        }
        Ok(Some(command))
    }

    /// Returns the verb, if one was set.
    #[inline]
    pub fn verb(&self) -> Option<&str> {
        self.parts.first().map(String::as_str)
    }

    /// Returns the arguments following the verb.
    #[inline]
    pub fn arguments(&self) -> &[String] {
        self.parts.get(1..).unwrap_or_default()
    }

    /// Returns all entries, verb first.
    #[inline]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Number of entries, verb included.
    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` when no verb is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Drops the verb and all arguments.
    pub fn clear(&mut self) {
        self.parts.clear();
    }

    /// Returns the `EVALSHA` form of an `EVAL` command.
    ///
    /// The script body at index 1 is replaced with its digest and every other
    /// argument is kept. Returns `None` for anything that isn't `EVAL` with a
    /// script body.
    pub fn to_evalsha(&self) -> Option<Command> {
        match self.parts.as_slice() {
            [verb, script, rest @ ..] if verb == EVAL => {
                let mut parts = Vec::with_capacity(self.parts.len());
                parts.push(EVALSHA.to_owned());
                parts.push(digest(script));
                parts.extend(rest.iter().cloned());
                Some(Command { parts })
            }
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join(" "))
    }
}
