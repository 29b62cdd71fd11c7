//! The message envelope exchanged between nodes.

use crate::node::NodeId;

/// A message delivered into a node's inbox.
///
/// The payload is opaque to the transport. It is moved in memory and never
/// serialized or inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rpc<P> {
    /// Identifier supplied by the caller that performed the send.
    pub sender: NodeId,
    pub payload: P,
}

impl<P> Rpc<P> {
    pub fn new(sender: NodeId, payload: P) -> Self {
        Self { sender, payload }
    }

    /// Split into sender and payload.
    pub fn into_parts(self) -> (NodeId, P) {
        (self.sender, self.payload)
    }
}
