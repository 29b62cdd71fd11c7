//! Sender identity carried on every RPC.
//!
//! The id is chosen by whoever performs the send. It is not derived from the
//! sending node's address, so a protocol layer is free to use its own
//! numbering scheme.

use std::fmt;

/// Compact identifier of the participant that originated an RPC.
///
/// Newtype over `u64` so it is cheap to copy, compare and hash.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Raw numeric value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
