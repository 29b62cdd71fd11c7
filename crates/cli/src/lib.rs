//! CLI driver for simulated local-transport networks.
//!
//! Provides commands for:
//! - Running broadcast rounds across a fully wired cluster
//! - Fanning out proof requests positionally to every peer

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
