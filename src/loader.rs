//! Dependency data loading
//!
//! Reads a JSON document of the form `{"node": ["dep1", "dep2"], ...}` into a
//! [`Graph`]. Key order in the document becomes the graph's node order.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::error::Category;

use crate::dependency::{AdjacencyMap, Graph};
use crate::error::{hints, DepchainError};

/// Input file used when neither the command line nor Depchain.toml names one
pub const DEFAULT_INPUT: &str = "/tmp/deps.json";

/// Parse dependency JSON from a string
///
/// A top-level `null` produces an empty graph.
pub fn parse_graph(content: &str) -> serde_json::Result<Graph> {
    let data: Option<AdjacencyMap> = serde_json::from_str(content)?;
    Ok(Graph::build(data))
}

/// Read and parse a dependency JSON file
pub fn load_graph(path: &Path) -> Result<Graph, DepchainError> {
    tracing::debug!(path = %path.display(), "Loading dependency data");

    let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => DepchainError::input_error_with_hint(
            path,
            "file not found",
            Some(err.into()),
            hints::input_not_found(),
        ),
        _ => DepchainError::input_error(
            path,
            format!("I/O error while reading the file: {}", err),
            Some(err.into()),
        ),
    })?;

    let graph = parse_graph(&content).map_err(|err| {
        let message = match err.classify() {
            Category::Syntax | Category::Eof => format!(
                "invalid JSON at line {} column {}",
                err.line(),
                err.column()
            ),
            Category::Data => format!("unexpected document structure: {}", err),
            Category::Io => format!("I/O error while parsing: {}", err),
        };
        DepchainError::input_error_with_hint(path, message, Some(err.into()), hints::invalid_json())
    })?;

    tracing::debug!(nodes = graph.len(), "Loaded dependency graph");
    Ok(graph)
}
