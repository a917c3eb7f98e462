//! Command implementations
//!
//! Each command module provides a clap-derived struct and execute method.

pub mod check;
pub mod graph;
pub mod resolve;

use std::path::Path;

use anyhow::Result;

use crate::config::DepchainConfig;
use crate::dependency::{Graph, UnknownNodePolicy};
use crate::loader;

/// Load the graph named on the command line, or the configured default
fn load_input(input: Option<&Path>, config: &DepchainConfig) -> Result<Graph> {
    let path = input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.input_path());

    Ok(loader::load_graph(&path)?)
}

/// Pick the unknown-node policy; flags win over Depchain.toml
fn unknown_node_policy(strict: bool, lenient: bool, config: &DepchainConfig) -> UnknownNodePolicy {
    if strict {
        UnknownNodePolicy::Strict
    } else if lenient {
        UnknownNodePolicy::Lenient
    } else {
        config.resolve.unknown_nodes
    }
}
