//! Command-line configuration.

use clap::Parser;
use tracing::Level;
use transport::{InboxCapacity, TransportConfig};

use crate::commands::Command;

/// Simulate message delivery between in-process nodes.
#[derive(Debug, Parser)]
#[command(name = "simnet", version, about)]
pub struct CliConfig {
    /// Number of nodes in the cluster.
    #[arg(short, long, default_value_t = 4)]
    pub nodes: usize,

    /// Rounds each node runs.
    #[arg(short, long, default_value_t = 3)]
    pub rounds: u64,

    /// Inbox capacity per node (unbounded when omitted).
    #[arg(long)]
    pub inbox_capacity: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::new().with_inbox_capacity(InboxCapacity::from(self.inbox_capacity))
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        tracing_subscriber::fmt()
            .with_max_level(self.log_level())
            .with_target(false)
            .init();

        anyhow::ensure!(self.nodes > 0, "a cluster needs at least one node");

        let result = self.command.execute(self.nodes, self.rounds, self.transport_config())?;
        print!("{result}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let config = CliConfig::try_parse_from(["simnet", "broadcast"]).unwrap();
        assert_eq!(config.nodes, 4);
        assert_eq!(config.rounds, 3);
        assert_eq!(config.transport_config().inbox_capacity, InboxCapacity::Unbounded);
        assert_eq!(config.command, Command::Broadcast);
    }

    #[test]
    fn test_parse_bounded_inbox_and_verbosity() {
        let config = CliConfig::try_parse_from([
            "simnet",
            "--nodes",
            "7",
            "--inbox-capacity",
            "2",
            "-vv",
            "proof-requests",
        ])
        .unwrap();
        assert_eq!(config.nodes, 7);
        assert_eq!(config.transport_config().inbox_capacity, InboxCapacity::Bounded(2));
        assert_eq!(config.log_level(), Level::DEBUG);
        assert_eq!(config.command, Command::ProofRequests);
    }
}
