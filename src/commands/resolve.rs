//! Resolve command - Print flattened dependency chains
//!
//! Usage:
//!   depchain resolve                       # Chains for every node in the default input
//!   depchain resolve deps.json             # Use a specific file
//!   depchain resolve --node app            # Only the chain starting at `app`
//!   depchain resolve --strict              # Fail on undeclared dependencies
//!   depchain resolve --format json         # Output as JSON

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use super::{load_input, unknown_node_policy};
use crate::config::DepchainConfig;
use crate::dependency::{Chain, DependencyResolver};
use crate::error::DepchainError;
use crate::output::{chains_to_json, format_chain};

/// Output format for resolve command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// One chain per line (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Print the dependency chain of every node
#[derive(Args, Debug)]
pub struct ResolveCommand {
    /// Dependency JSON file (default: from Depchain.toml, else /tmp/deps.json)
    pub input: Option<PathBuf>,

    /// Only resolve the chain starting at this node (repeatable)
    #[arg(long = "node", short = 'n', value_name = "NAME")]
    pub nodes: Vec<String>,

    /// Fail when a dependency is not declared as a node
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// Treat undeclared dependencies as leaves
    #[arg(long)]
    pub lenient: bool,

    /// Output format: text, json
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Separator between chain entries in text output
    #[arg(long)]
    pub separator: Option<String>,
}

impl ResolveCommand {
    /// Execute the resolve command
    pub fn execute(self, config: &DepchainConfig, _verbose: bool) -> Result<()> {
        let graph = load_input(self.input.as_deref(), config)?;
        let policy = unknown_node_policy(self.strict, self.lenient, config);
        let chains = self.resolve(DependencyResolver::with_policy(&graph, policy))?;

        match self.format {
            OutputFormat::Text => {
                let separator = self
                    .separator
                    .as_deref()
                    .unwrap_or(&config.resolve.separator);
                for chain in &chains {
                    println!("{}", format_chain(chain, separator));
                }
            }
            OutputFormat::Json => println!("{}", chains_to_json(&chains)?),
        }

        Ok(())
    }

    /// Every chain, or only those of the requested nodes in request order
    fn resolve(&self, mut resolver: DependencyResolver<'_>) -> Result<Vec<Chain>, DepchainError> {
        if self.nodes.is_empty() {
            resolver.resolve_all()?;
            return Ok(resolver.into_chains());
        }

        let chains = self
            .nodes
            .iter()
            .map(|node| resolver.resolve_node(node))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(chains)
    }
}
