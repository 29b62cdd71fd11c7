//! In-process transport backed by memory queues.
//!
//! # Delivery Model
//!
//! A [`LocalTransport`] is one simulated endpoint. Sending does not go
//! through any router: the sender looks the target up in its own peer
//! registry and pushes straight onto the target's inbox.
//!
//! ```text
//!  node "a"                         node "b"
//!  ┌──────────────────────┐         ┌──────────────────────┐
//!  │ peers: {"b" -> weak} │──push──▶│ inbox (FIFO)         │──▶ consume()
//!  └──────────────────────┘         └──────────────────────┘
//! ```
//!
//! # Concurrency
//!
//! - The registry is guarded by a `parking_lot::RwLock`: any number of sends
//!   read it together, a connect excludes everything else.
//! - The lock is never held while pushing, so a full bounded inbox cannot
//!   stall connects.
//! - Peers are held as `Weak` handles. A node does not keep its peers alive.
//!   A peer that has been dropped is treated as never connected: it is left
//!   out of `peers`, `peer_count` and fan-out, and a targeted send to it is
//!   unreachable.
//!
//! # Ordering
//!
//! The registry is a `BTreeMap`, so broadcast and proof-request fan-out visit
//! peers in ascending address order. Messages from one sending call to one
//! target keep their relative order; nothing is promised across senders.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::config::{InboxCapacity, TransportConfig};
use crate::error::{Result, TransportError};
use crate::inbox::{Consume, Inbox};
use crate::network::Transport;
use crate::node::NodeId;
use crate::rpc::Rpc;

/// Shared handle to a local node.
pub type LocalPeer<P> = Arc<LocalTransport<P>>;

/// One addressable in-process endpoint.
///
/// # Example
///
/// ```rust
/// use transport::{LocalTransport, NodeId, Transport};
///
/// let a = LocalTransport::<&str>::new("a");
/// let b = LocalTransport::<&str>::new("b");
/// a.connect("b", b.clone());
///
/// a.broadcast(NodeId(7), "hello").unwrap();
///
/// let rpc = b.consume().try_next().unwrap();
/// assert_eq!(rpc.sender, NodeId(7));
/// assert_eq!(rpc.payload, "hello");
/// assert!(a.consume().try_next().is_none());
/// ```
pub struct LocalTransport<P> {
    addr: String,
    peers: RwLock<BTreeMap<String, Weak<LocalTransport<P>>>>,
    inbox: Inbox<P>,
}

impl<P: Send + 'static> LocalTransport<P> {
    /// Create a node with an unbounded inbox.
    pub fn new(addr: impl Into<String>) -> LocalPeer<P> {
        Self::with_config(addr, TransportConfig::default())
    }

    pub fn with_config(addr: impl Into<String>, config: TransportConfig) -> LocalPeer<P> {
        Arc::new(Self {
            addr: addr.into(),
            peers: RwLock::new(BTreeMap::new()),
            inbox: Inbox::new(config.inbox_capacity),
        })
    }

    /// Capacity this node's inbox was built with.
    pub fn inbox_capacity(&self) -> InboxCapacity {
        self.inbox.capacity()
    }

    /// Registered peer addresses, in fan-out order.
    ///
    /// Peers whose node has been dropped are left out, exactly as if they had
    /// never been connected.
    pub fn peers(&self) -> Vec<String> {
        self.peers
            .read()
            .iter()
            .filter(|(_, peer)| peer.strong_count() > 0)
            .map(|(addr, _)| addr.clone())
            .collect()
    }

    pub fn peer_count(&self) -> usize {
        self.peers
            .read()
            .values()
            .filter(|peer| peer.strong_count() > 0)
            .count()
    }

    pub fn is_connected(&self, addr: &str) -> bool {
        self.peers
            .read()
            .get(addr)
            .is_some_and(|peer| peer.strong_count() > 0)
    }

    /// Number of messages waiting in this node's inbox.
    pub fn pending(&self) -> usize {
        self.inbox.len()
    }

    /// Send `payload` to the peer registered under `target`.
    ///
    /// Returns [`TransportError::Unreachable`] when `target` was never
    /// connected or its node has been dropped. Nothing is enqueued in that
    /// case and the send is not retried.
    pub fn send(&self, sender: NodeId, target: &str, payload: P) -> Result<()> {
        let peer = {
            let peers = self.peers.read();
            peers.get(target).and_then(Weak::upgrade)
        };
        let peer = peer.ok_or_else(|| TransportError::unreachable(target))?;

        peer.inbox.push(Rpc::new(sender, payload));

        trace!(from = %self.addr, to = target, sender = %sender, "rpc delivered");
        metrics::counter!("transport.messages_delivered", "target" => target.to_string())
            .increment(1);
        Ok(())
    }
}

impl<P: Send + 'static> Transport<P> for LocalTransport<P> {
    type Peer = LocalPeer<P>;

    fn address(&self) -> &str {
        &self.addr
    }

    fn connect(&self, addr: &str, peer: Self::Peer) {
        let previous = self
            .peers
            .write()
            .insert(addr.to_string(), Arc::downgrade(&peer));

        if previous.is_some() {
            debug!(node = %self.addr, peer = addr, "peer replaced");
        } else {
            debug!(node = %self.addr, peer = addr, "peer connected");
        }
    }

    fn broadcast(&self, sender: NodeId, payload: P) -> Result<()>
    where
        P: Clone,
    {
        for addr in self.peers() {
            self.send(sender, &addr, payload.clone())?;
        }
        Ok(())
    }

    fn send_proof_requests(&self, sender: NodeId, requests: Vec<P>) -> Result<()> {
        let peers = self.peers();
        if requests.len() < peers.len() {
            return Err(TransportError::InsufficientRequests {
                peers: peers.len(),
                requests: requests.len(),
            });
        }
        if requests.len() > peers.len() {
            debug!(
                node = %self.addr,
                surplus = requests.len() - peers.len(),
                "dropping proof requests without a peer"
            );
        }

        for (addr, request) in peers.iter().zip(requests) {
            self.send(sender, addr, request)?;
        }
        Ok(())
    }

    fn consume(&self) -> Consume<P> {
        self.inbox.consume()
    }
}

impl<P> fmt::Debug for LocalTransport<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalTransport")
            .field("addr", &self.addr)
            .field("peers", &self.peers.read().keys().collect::<Vec<_>>())
            .finish()
    }
}
