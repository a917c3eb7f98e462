//! CLI argument parsing using clap derive macros

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{check::CheckCommand, graph::GraphCommand, resolve::ResolveCommand};
use crate::config::DepchainConfig;
use crate::utils::terminal;

/// depchain - Dependency chain resolver
///
/// Flattens the transitive dependencies of every node in a JSON dependency
/// graph and rejects circular dependencies.
#[derive(Parser, Debug)]
#[command(name = "depchain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use this configuration file instead of searching for Depchain.toml
    #[arg(long, global = true, value_name = "PATH", env = "DEPCHAIN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the flattened dependency chain of every node
    Resolve(ResolveCommand),

    /// Show each node with its declared dependencies
    Graph(GraphCommand),

    /// Validate a dependency file
    Check(CheckCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Set up terminal colors
        if self.no_color {
            terminal::set_colors(false);
        }

        let config = match self.config {
            Some(ref path) => DepchainConfig::load_from_path(path)?,
            None => DepchainConfig::discover()?,
        };

        // Execute the subcommand
        match self.command {
            Commands::Resolve(cmd) => cmd.execute(&config, self.verbose),
            Commands::Graph(cmd) => cmd.execute(&config, self.verbose),
            Commands::Check(cmd) => cmd.execute(&config, self.verbose),
        }
    }
}
