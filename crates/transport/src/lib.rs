//! In-process transport for exercising distributed protocols.
//!
//! This crate provides addressable endpoints that behave like network peers
//! but are backed by in-memory queues:
//! - The `Transport` capability shared by every transport kind
//! - The local, queue-backed transport and its peer registry
//! - Per-node inboxes with a blocking consumption stream
//! - Cluster helpers for wiring simulated networks

pub mod cluster;
pub mod config;
pub mod error;
pub mod inbox;
pub mod local;
pub mod network;
pub mod node;
pub mod rpc;

pub use cluster::LocalCluster;
pub use config::{InboxCapacity, TransportConfig};
pub use error::{Result, TransportError};
pub use inbox::Consume;
pub use local::LocalTransport;
pub use network::Transport;
pub use node::NodeId;
pub use rpc::Rpc;
