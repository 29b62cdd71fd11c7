//! Simulation commands.
//!
//! Every command builds a fully wired cluster, starts one consumer thread per
//! node draining its inbox, and one sender thread per node running the
//! requested rounds. Each node ends up receiving `(nodes - 1) * rounds`
//! messages; a consumer that waits longer than [`RECV_TIMEOUT`] for one of
//! them fails the run.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::Subcommand;
use tracing::{debug, info};
use transport::{Consume, LocalCluster, LocalTransport, NodeId, Transport, TransportConfig};

/// Upper bound on the wait for any single message.
pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Payload exchanged by the simulated protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Value { round: u64 },
    ProofRequest { round: u64, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Every node broadcasts one value per round.
    Broadcast,
    /// Every node sends one positional proof request per peer per round.
    ProofRequests,
}

/// What one node observed on its inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub values: u64,
    pub proof_requests: u64,
    pub senders: BTreeSet<NodeId>,
}

impl NodeStats {
    fn record(&mut self, sender: NodeId, message: Message) {
        match message {
            Message::Value { .. } => self.values += 1,
            Message::ProofRequest { .. } => self.proof_requests += 1,
        }
        self.senders.insert(sender);
    }

    pub fn total(&self) -> u64 {
        self.values + self.proof_requests
    }
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub command: Command,
    pub rounds: u64,
    pub nodes: BTreeMap<String, NodeStats>,
}

impl Command {
    pub fn execute(
        self,
        nodes: usize,
        rounds: u64,
        config: TransportConfig,
    ) -> anyhow::Result<CommandResult> {
        let expected = expected_per_node(nodes, rounds)?;
        let addrs: Vec<String> = (0..nodes).map(|i| format!("node-{i}")).collect();
        let cluster = LocalCluster::<Message>::with_config(addrs, config);

        info!(command = ?self, nodes, rounds, expected, "starting simulation");

        let stats = thread::scope(|s| -> anyhow::Result<BTreeMap<String, NodeStats>> {
            let consumers: Vec<_> = cluster
                .nodes()
                .map(|node| {
                    let addr = node.address().to_string();
                    let inbox = node.consume();
                    s.spawn(move || drain(addr, inbox, expected))
                })
                .collect();

            let senders: Vec<_> = cluster
                .nodes()
                .enumerate()
                .map(|(id, node)| s.spawn(move || self.run_node(node, NodeId(id as u64), rounds)))
                .collect();

            for sender in senders {
                sender
                    .join()
                    .map_err(|_| anyhow!("sender thread panicked"))??;
            }

            let mut stats = BTreeMap::new();
            for consumer in consumers {
                let (addr, node_stats) = consumer
                    .join()
                    .map_err(|_| anyhow!("consumer thread panicked"))??;
                stats.insert(addr, node_stats);
            }
            Ok(stats)
        })?;

        Ok(CommandResult {
            command: self,
            rounds,
            nodes: stats,
        })
    }

    fn run_node(
        self,
        node: &LocalTransport<Message>,
        id: NodeId,
        rounds: u64,
    ) -> anyhow::Result<()> {
        for round in 0..rounds {
            let sent = match self {
                Command::Broadcast => node.broadcast(id, Message::Value { round }),
                Command::ProofRequests => {
                    let requests = (0..node.peer_count())
                        .map(|index| Message::ProofRequest { round, index })
                        .collect();
                    node.send_proof_requests(id, requests)
                }
            };
            sent.with_context(|| format!("{} failed in round {round}", node.address()))?;
        }
        debug!(node = node.address(), rounds, "sender finished");
        Ok(())
    }
}

/// Messages each node receives over a run: one per peer per round.
fn expected_per_node(nodes: usize, rounds: u64) -> anyhow::Result<u64> {
    let peers = u64::try_from(nodes.saturating_sub(1))?;
    peers
        .checked_mul(rounds)
        .ok_or_else(|| anyhow!("{nodes} nodes over {rounds} rounds overflows the message count"))
}

fn drain(
    addr: String,
    inbox: Consume<Message>,
    expected: u64,
) -> anyhow::Result<(String, NodeStats)> {
    let mut stats = NodeStats::default();
    for _ in 0..expected {
        let rpc = inbox
            .next_timeout(RECV_TIMEOUT)
            .ok_or_else(|| anyhow!("{addr} timed out after {} messages", stats.total()))?;
        stats.record(rpc.sender, rpc.payload);
    }
    debug!(node = %addr, received = stats.total(), "consumer finished");
    Ok((addr, stats))
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}: {} rounds, {} nodes", self.command, self.rounds, self.nodes.len())?;
        writeln!(f, "{:<12} {:>8} {:>15} {:>8}", "node", "values", "proof-requests", "senders")?;
        for (addr, stats) in &self.nodes {
            writeln!(
                f,
                "{:<12} {:>8} {:>15} {:>8}",
                addr,
                stats.values,
                stats.proof_requests,
                stats.senders.len()
            )?;
        }
        Ok(())
    }
}
