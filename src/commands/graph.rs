//! Graph command - Display the declared adjacency listing
//!
//! Usage:
//!   depchain graph                # Show every node and its direct dependencies
//!   depchain graph deps.json      # Use a specific file

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::load_input;
use crate::config::DepchainConfig;
use crate::utils::terminal::print_info;

/// Display each node with its declared dependencies
#[derive(Args, Debug)]
pub struct GraphCommand {
    /// Dependency JSON file (default: from Depchain.toml, else /tmp/deps.json)
    pub input: Option<PathBuf>,
}

impl GraphCommand {
    /// Execute the graph command
    pub fn execute(self, config: &DepchainConfig, _verbose: bool) -> Result<()> {
        let graph = load_input(self.input.as_deref(), config)?;

        if graph.is_empty() {
            print_info("No nodes declared");
            return Ok(());
        }

        print!("{}", graph);
        Ok(())
    }
}
