//! Rendering of resolved dependency chains

use serde::Serialize;

use crate::dependency::Chain;

/// Root structure for JSON output
#[derive(Serialize, Debug)]
struct ChainsJson<'a> {
    chains: Vec<ChainJson<'a>>,
}

/// One chain keyed by its start node
#[derive(Serialize, Debug)]
struct ChainJson<'a> {
    node: &'a str,
    chain: &'a [String],
}

/// Render a chain as `node1 -> node2 -> ... -> nodeN`
pub fn format_chain(chain: &[String], separator: &str) -> String {
    chain.join(separator)
}

/// Render chains as a pretty-printed JSON document
pub fn chains_to_json(chains: &[Chain]) -> serde_json::Result<String> {
    let doc = ChainsJson {
        chains: chains
            .iter()
            .map(|chain| ChainJson {
                node: chain.first().map(String::as_str).unwrap_or_default(),
                chain,
            })
            .collect(),
    };

    serde_json::to_string_pretty(&doc)
}
