//! Identity of the request a session is serving.

use std::fmt;

/// Opaque identity of a unit of work served by a worker.
///
/// Made of the host's request sequence number and the slot the request
/// occupies. Sequence numbers alone may repeat on some hosts, so both parts
/// are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId {
    sequence: u64,
    slot: u32,
}

impl RequestId {
    /// Creates a request identity.
    #[inline]
    pub const fn new(sequence: u64, slot: u32) -> Self {
        Self { sequence, slot }
    }

    /// Request sequence number.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Slot the request is served from.
    #[inline]
    pub fn slot(&self) -> u32 {
        self.slot
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.sequence, self.slot)
    }
}

impl From<(u64, u32)> for RequestId {
    fn from((sequence, slot): (u64, u32)) -> Self {
        Self::new(sequence, slot)
    }
}
