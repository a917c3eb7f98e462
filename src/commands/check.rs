//! Check command - Validate a dependency file without printing chains
//!
//! Usage:
//!   depchain check                # Validate the default input
//!   depchain check --strict       # Undeclared dependencies are errors

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::{load_input, unknown_node_policy};
use crate::config::DepchainConfig;
use crate::dependency::{DependencyResolver, Graph, UnknownNodePolicy};
use crate::error::DepchainError;
use crate::utils::terminal::{print_info, print_success, print_warning};

/// Check that every dependency chain resolves
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Dependency JSON file (default: from Depchain.toml, else /tmp/deps.json)
    pub input: Option<PathBuf>,

    /// Fail when a dependency is not declared as a node
    #[arg(long, conflicts_with = "lenient")]
    pub strict: bool,

    /// Treat undeclared dependencies as leaves
    #[arg(long)]
    pub lenient: bool,
}

/// Outcome of a successful check
#[derive(Debug, PartialEq, Eq)]
struct CheckReport {
    nodes: usize,
    dangling: Vec<(String, String)>,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(self, config: &DepchainConfig, verbose: bool) -> Result<()> {
        let graph = load_input(self.input.as_deref(), config)?;
        let policy = unknown_node_policy(self.strict, self.lenient, config);

        print_info(&format!("{} node(s) declared", graph.len()));

        let report = check_graph(&graph, policy)?;

        for (from, to) in &report.dangling {
            print_warning(&format!("'{}' depends on undeclared '{}'", from, to));
        }

        if verbose && report.dangling.is_empty() {
            print_info("No undeclared dependencies");
        }

        print_success(&format!(
            "All {} dependency chain(s) resolved",
            report.nodes
        ));
        Ok(())
    }
}

/// Resolve every chain and collect dangling edges
fn check_graph(graph: &Graph, policy: UnknownNodePolicy) -> Result<CheckReport, DepchainError> {
    let dangling = graph
        .dangling_edges()
        .into_iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

    let mut resolver = DependencyResolver::with_policy(graph, policy);
    let nodes = resolver.resolve_all()?.len();

    Ok(CheckReport { nodes, dangling })
}
