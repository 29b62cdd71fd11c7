//! Fully wired groups of local nodes.
//!
//! Protocol tests usually want N endpoints that can all reach each other.
//! [`LocalCluster`] builds them and connects every node to every other node,
//! never to itself. The cluster owns the node handles; peers only hold weak
//! references, so dropping the cluster tears the whole network down.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::TransportConfig;
use crate::local::{LocalPeer, LocalTransport};
use crate::network::Transport;

/// A set of local nodes wired all-to-all.
#[derive(Debug)]
pub struct LocalCluster<P> {
    nodes: BTreeMap<String, LocalPeer<P>>,
}

impl<P: Send + 'static> LocalCluster<P> {
    /// Build a cluster with default node configuration.
    ///
    /// Duplicate addresses collapse into a single node.
    pub fn new<I, S>(addrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(addrs, TransportConfig::default())
    }

    pub fn with_config<I, S>(addrs: I, config: TransportConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut nodes = BTreeMap::new();
        for addr in addrs {
            let addr = addr.into();
            let node = LocalTransport::with_config(addr.clone(), config);
            nodes.insert(addr, node);
        }

        for (addr, node) in &nodes {
            for (peer_addr, peer) in &nodes {
                if addr != peer_addr {
                    node.connect(peer_addr, peer.clone());
                }
            }
        }

        debug!(nodes = nodes.len(), "local cluster wired");
        Self { nodes }
    }

    /// Handle to the node at `addr`.
    pub fn node(&self, addr: &str) -> Option<&LocalPeer<P>> {
        self.nodes.get(addr)
    }

    /// All nodes, in address order.
    pub fn nodes(&self) -> impl Iterator<Item = &LocalPeer<P>> {
        self.nodes.values()
    }

    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_node_reaches_every_other() {
        let cluster = LocalCluster::<u32>::new(["a", "b", "c", "d"]);
        assert_eq!(cluster.len(), 4);

        for node in cluster.nodes() {
            assert_eq!(node.peer_count(), 3);
            assert!(!node.is_connected(node.address()));
        }
    }

    #[test]
    fn test_duplicate_addresses_collapse() {
        let cluster = LocalCluster::<u32>::new(["a", "a", "b"]);
        assert_eq!(cluster.len(), 2);
        assert_eq!(cluster.addresses().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_cluster() {
        let cluster = LocalCluster::<u32>::new(Vec::<String>::new());
        assert!(cluster.is_empty());
        assert!(cluster.node("a").is_none());
    }
}
