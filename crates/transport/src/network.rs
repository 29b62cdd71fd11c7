//! Transport capability shared by every transport kind.
//!
//! A protocol layer talks to its peers only through [`Transport`], so the
//! in-process [`LocalTransport`](crate::local::LocalTransport) and a real
//! network transport can be swapped without the protocol noticing.

use crate::error::Result;
use crate::inbox::Consume;
use crate::node::NodeId;

/// Addressable endpoint able to reach a set of wired peers.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`: sends and connects arrive from many
/// threads while the owner drains [`consume`](Transport::consume).
pub trait Transport<P: Send>: Send + Sync {
    /// Handle used to wire a peer into this transport.
    type Peer;

    /// Stable identity of this endpoint.
    fn address(&self) -> &str;

    /// Register `peer` under `addr`, replacing any previous entry.
    fn connect(&self, addr: &str, peer: Self::Peer);

    /// Deliver `payload` to every registered peer, tagged with `sender`.
    ///
    /// Stops at the first failed delivery; peers not yet reached receive
    /// nothing. Broadcasting with no peers succeeds.
    fn broadcast(&self, sender: NodeId, payload: P) -> Result<()>
    where
        P: Clone;

    /// Deliver one request per peer, pairing peers and requests by position.
    ///
    /// Fails without sending anything when there are fewer requests than
    /// peers.
    fn send_proof_requests(&self, sender: NodeId, requests: Vec<P>) -> Result<()>;

    /// Live stream of RPCs addressed to this endpoint.
    fn consume(&self) -> Consume<P>;
}
