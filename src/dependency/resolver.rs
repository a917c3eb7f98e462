//! Dependency resolver producing flattened per-node dependency chains
//!
//! For every node the resolver walks the graph depth-first and records each
//! node the first time it is discovered: the start node first, then its
//! dependencies in declared order, each followed by its own expansion. Nodes
//! already finalized by an earlier branch are not repeated.
//!
//! The walk uses an explicit frame stack, so graph depth is limited by heap
//! memory rather than by the call stack.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::dependency::graph::Graph;

/// A start node followed by its transitive dependencies, each exactly once
pub type Chain = Vec<String>;

/// Errors raised while resolving dependency chains
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// `from` depends on `to`, which is still on the active traversal path
    #[error("Circular dependency detected: {from} -> {to}")]
    CircularDependency { from: String, to: String },

    /// An edge target has no adjacency entry (strict mode only)
    #[error("Unknown dependency '{node}' required by '{dependent}'")]
    UnknownNode { node: String, dependent: String },

    /// A traversal was requested for a node that is not in the graph
    #[error("Node '{node}' is not declared in the dependency graph")]
    NodeNotFound { node: String },
}

/// How to treat edge targets that are not declared as nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownNodePolicy {
    /// Treat the target as a leaf with no dependencies
    #[default]
    Lenient,
    /// Fail with [`ResolveError::UnknownNode`]
    Strict,
}

/// Working sets of a single traversal
///
/// A fresh `Traversal` is used for every top-level node by
/// [`DependencyResolver::resolve_node`] and [`DependencyResolver::resolve_all`].
/// Passing the same value to several [`DependencyResolver::traverse`] calls
/// shares the `resolved` set between them, so later roots skip whatever the
/// earlier ones already flattened.
#[derive(Debug, Default)]
pub struct Traversal<'g> {
    chain: Chain,
    resolved: HashSet<&'g str>,
    unresolved: HashSet<&'g str>,
}

impl<'g> Traversal<'g> {
    /// Create empty working sets
    pub fn new() -> Self {
        Self::default()
    }

    /// The chain accumulated so far
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    /// Whether `node` has been fully flattened into the chain
    pub fn is_resolved(&self, node: &str) -> bool {
        self.resolved.contains(node)
    }

    /// Consume the working sets, keeping only the chain
    pub fn into_chain(self) -> Chain {
        self.chain
    }
}

/// One pending node on the explicit traversal stack
struct Frame<'g> {
    node: &'g str,
    edges: &'g [String],
    next: usize,
}

/// Dependency resolver over a borrowed [`Graph`]
#[derive(Debug)]
pub struct DependencyResolver<'g> {
    graph: &'g Graph,
    policy: UnknownNodePolicy,
    chains: Vec<Chain>,
}

impl<'g> DependencyResolver<'g> {
    /// Create a resolver that treats unknown edge targets as leaves
    pub fn new(graph: &'g Graph) -> Self {
        Self::with_policy(graph, UnknownNodePolicy::default())
    }

    /// Create a resolver with an explicit unknown-node policy
    pub fn with_policy(graph: &'g Graph, policy: UnknownNodePolicy) -> Self {
        Self {
            graph,
            policy,
            chains: Vec::new(),
        }
    }

    /// The graph being resolved
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// The unknown-node policy in effect
    pub fn policy(&self) -> UnknownNodePolicy {
        self.policy
    }

    /// Chains stored by the last successful [`resolve_all`](Self::resolve_all)
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Consume the resolver, keeping the stored chains
    pub fn into_chains(self) -> Vec<Chain> {
        self.chains
    }

    /// Resolve the chain of every node, in the graph's node order
    ///
    /// Any previously stored chains are discarded first. If one traversal
    /// fails the whole call fails and nothing is stored.
    pub fn resolve_all(&mut self) -> Result<&[Chain], ResolveError> {
        self.chains.clear();

        let chains = self
            .graph
            .nodes()
            .map(|node| self.resolve_node(node))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = chains.len(), "Resolved all dependency chains");
        self.chains = chains;
        Ok(&self.chains)
    }

    /// Resolve the chain of a single node with fresh working sets
    pub fn resolve_node(&self, node: &str) -> Result<Chain, ResolveError> {
        let mut traversal = Traversal::new();
        self.traverse(node, &mut traversal)?;
        Ok(traversal.into_chain())
    }

    /// Extend `traversal` with the depth-first expansion of `node`
    ///
    /// Does nothing if `node` is already resolved in `traversal`. On error the
    /// active path is abandoned; the chain keeps whatever was appended before
    /// the failure.
    pub fn traverse(&self, node: &str, traversal: &mut Traversal<'g>) -> Result<(), ResolveError> {
        let root = self.graph.key(node).ok_or_else(|| ResolveError::NodeNotFound {
            node: node.to_string(),
        })?;

        if traversal.resolved.contains(root) {
            return Ok(());
        }

        tracing::debug!(node = root, "Traversing dependencies");

        let result = self.walk(root, traversal);
        if result.is_err() {
            traversal.unresolved.clear();
        }
        result
    }

    fn walk(&self, root: &'g str, traversal: &mut Traversal<'g>) -> Result<(), ResolveError> {
        let mut stack = vec![self.enter(root, traversal)];

        while let Some(frame) = stack.last_mut() {
            let (from, edges, next) = (frame.node, frame.edges, frame.next);

            let Some(edge) = edges.get(next) else {
                // Every dependency of `from` is flattened
                stack.pop();
                traversal.unresolved.remove(from);
                traversal.resolved.insert(from);
                continue;
            };
            frame.next += 1;

            let edge = edge.as_str();
            tracing::trace!(from, to = edge, "Visiting edge");

            if traversal.resolved.contains(edge) {
                continue;
            }

            if traversal.unresolved.contains(edge) {
                return Err(ResolveError::CircularDependency {
                    from: from.to_string(),
                    to: edge.to_string(),
                });
            }

            if self.policy == UnknownNodePolicy::Strict && !self.graph.contains(edge) {
                return Err(ResolveError::UnknownNode {
                    node: edge.to_string(),
                    dependent: from.to_string(),
                });
            }

            stack.push(self.enter(edge, traversal));
        }

        Ok(())
    }

    /// Put `node` on the active path and record its discovery
    fn enter(&self, node: &'g str, traversal: &mut Traversal<'g>) -> Frame<'g> {
        traversal.unresolved.insert(node);
        traversal.chain.push(node.to_string());

        Frame {
            node,
            edges: self.graph.edges_of(node).unwrap_or_default(),
            next: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dependency::graph::AdjacencyMap;

    fn graph_from_json(json: &str) -> Graph {
        let data: AdjacencyMap = serde_json::from_str(json).unwrap();
        Graph::build(Some(data))
    }

    fn chain(nodes: &[&str]) -> Chain {
        nodes.iter().map(|s| s.to_string()).collect()
    }

    const LINEAR: &str = r#"{"a":["b"],"b":["c"],"c":["d","e"],"d":[],"e":[]}"#;
    const ISOLATED: &str = r#"{"a":[],"b":[],"c":[],"d":[]}"#;
    const DIAMOND: &str = r#"{
        "a": ["b", "f"],
        "b": ["c", "d", "e"],
        "c": [],
        "d": ["e"],
        "e": ["g"],
        "f": ["b"],
        "g": []
    }"#;

    #[test]
    fn test_resolve_all_linear() {
        let graph = graph_from_json(LINEAR);
        let mut resolver = DependencyResolver::new(&graph);

        let chains = resolver.resolve_all().unwrap();
        assert_eq!(
            chains,
            vec![
                chain(&["a", "b", "c", "d", "e"]),
                chain(&["b", "c", "d", "e"]),
                chain(&["c", "d", "e"]),
                chain(&["d"]),
                chain(&["e"]),
            ]
        );
    }

    #[test]
    fn test_resolve_all_isolated_nodes() {
        let graph = graph_from_json(ISOLATED);
        let mut resolver = DependencyResolver::new(&graph);

        resolver.resolve_all().unwrap();
        assert_eq!(
            resolver.chains(),
            vec![chain(&["a"]), chain(&["b"]), chain(&["c"]), chain(&["d"])]
        );
    }

    #[test]
    fn test_resolve_all_shared_dependencies() {
        let graph = graph_from_json(DIAMOND);
        let mut resolver = DependencyResolver::new(&graph);

        resolver.resolve_all().unwrap();
        assert_eq!(
            resolver.into_chains(),
            vec![
                chain(&["a", "b", "c", "d", "e", "g", "f"]),
                chain(&["b", "c", "d", "e", "g"]),
                chain(&["c"]),
                chain(&["d", "e", "g"]),
                chain(&["e", "g"]),
                chain(&["f", "b", "c", "d", "e", "g"]),
                chain(&["g"]),
            ]
        );
    }

    #[test]
    fn test_resolve_node_each_start() {
        let graph = graph_from_json(DIAMOND);
        let resolver = DependencyResolver::new(&graph);

        assert_eq!(resolver.resolve_node("f").unwrap(), chain(&["f", "b", "c", "d", "e", "g"]));
        assert_eq!(resolver.resolve_node("d").unwrap(), chain(&["d", "e", "g"]));
        // Repeated calls never leak working sets between each other
        assert_eq!(resolver.resolve_node("f").unwrap(), chain(&["f", "b", "c", "d", "e", "g"]));
    }

    #[test]
    fn test_empty_graph() {
        let graph = graph_from_json("{}");
        let mut resolver = DependencyResolver::new(&graph);
        assert!(resolver.resolve_all().unwrap().is_empty());

        let graph = Graph::build(None);
        let mut resolver = DependencyResolver::new(&graph);
        assert!(resolver.resolve_all().unwrap().is_empty());
    }

    #[test]
    fn test_circular_dependency() {
        let graph = graph_from_json(r#"{"a":["b"],"b":["a"]}"#);
        let resolver = DependencyResolver::new(&graph);

        assert_eq!(
            resolver.resolve_node("a"),
            Err(ResolveError::CircularDependency {
                from: "b".to_string(),
                to: "a".to_string(),
            })
        );
        assert_eq!(
            resolver.resolve_node("b"),
            Err(ResolveError::CircularDependency {
                from: "a".to_string(),
                to: "b".to_string(),
            })
        );
    }

    #[test]
    fn test_self_dependency() {
        let graph = Graph::from_iter([("a", vec!["a"])]);
        let resolver = DependencyResolver::new(&graph);

        let err = resolver.resolve_node("a").unwrap_err();
        assert_eq!(err.to_string(), "Circular dependency detected: a -> a");
    }

    #[test]
    fn test_resolve_all_aborts_on_cycle() {
        // "a" resolves fine, the cycle is only reachable from "b"
        let graph = Graph::from_iter([
            ("a", vec![]),
            ("b", vec!["c"]),
            ("c", vec!["d"]),
            ("d", vec!["b"]),
        ]);
        let mut resolver = DependencyResolver::new(&graph);

        let err = resolver.resolve_all().unwrap_err();
        assert_eq!(
            err,
            ResolveError::CircularDependency {
                from: "d".to_string(),
                to: "b".to_string(),
            }
        );
        assert!(resolver.chains().is_empty());
    }

    #[test]
    fn test_failed_run_discards_previous_chains() {
        let good = graph_from_json(LINEAR);
        let mut resolver = DependencyResolver::new(&good);
        resolver.resolve_all().unwrap();
        assert_eq!(resolver.chains().len(), 5);

        // A second run recomputes rather than appending
        resolver.resolve_all().unwrap();
        assert_eq!(resolver.chains().len(), 5);

        let bad = graph_from_json(r#"{"a":["b"],"b":["a"]}"#);
        let mut resolver = DependencyResolver::new(&bad);
        assert!(resolver.resolve_all().is_err());
        assert!(resolver.chains().is_empty());
    }

    #[test]
    fn test_unknown_target_lenient() {
        let graph = Graph::from_iter([("app", vec!["fmt", "spdlog"]), ("spdlog", vec!["fmt"])]);
        let mut resolver = DependencyResolver::new(&graph);

        let chains = resolver.resolve_all().unwrap();
        assert_eq!(
            chains,
            vec![chain(&["app", "fmt", "spdlog"]), chain(&["spdlog", "fmt"])]
        );
    }

    #[test]
    fn test_unknown_target_strict() {
        let graph = Graph::from_iter([("app", vec!["fmt", "spdlog"]), ("spdlog", vec![])]);
        let resolver = DependencyResolver::with_policy(&graph, UnknownNodePolicy::Strict);

        assert_eq!(
            resolver.resolve_node("app"),
            Err(ResolveError::UnknownNode {
                node: "fmt".to_string(),
                dependent: "app".to_string(),
            })
        );
        assert_eq!(resolver.resolve_node("spdlog").unwrap(), chain(&["spdlog"]));
    }

    #[test]
    fn test_unknown_start_node() {
        let graph = Graph::from_iter([("a", vec!["b"])]);
        let resolver = DependencyResolver::new(&graph);

        assert_eq!(
            resolver.resolve_node("b"),
            Err(ResolveError::NodeNotFound { node: "b".to_string() })
        );
    }

    #[test]
    fn test_shared_traversal_skips_resolved_roots() {
        let graph = graph_from_json(DIAMOND);
        let resolver = DependencyResolver::new(&graph);
        let mut traversal = Traversal::new();

        resolver.traverse("b", &mut traversal).unwrap();
        assert!(traversal.is_resolved("g"));

        resolver.traverse("a", &mut traversal).unwrap();
        // "b" and everything below it were already flattened
        assert_eq!(traversal.chain(), chain(&["b", "c", "d", "e", "g", "a", "f"]));

        resolver.traverse("e", &mut traversal).unwrap();
        assert_eq!(traversal.into_chain().len(), 7);
    }

    #[test]
    fn test_traversal_recovers_after_cycle() {
        let graph = Graph::from_iter([("a", vec!["b"]), ("b", vec!["a"]), ("c", vec![])]);
        let resolver = DependencyResolver::new(&graph);
        let mut traversal = Traversal::new();

        assert!(resolver.traverse("a", &mut traversal).is_err());
        resolver.traverse("c", &mut traversal).unwrap();
        assert!(traversal.is_resolved("c"));
    }

    #[test]
    fn test_chain_properties() {
        let graph = graph_from_json(DIAMOND);
        let mut resolver = DependencyResolver::new(&graph);
        let chains = resolver.resolve_all().unwrap().to_vec();

        assert_eq!(chains.len(), graph.len());
        for (node, chain) in graph.nodes().zip(&chains) {
            assert_eq!(chain[0], node);

            let unique: HashSet<&String> = chain.iter().collect();
            assert_eq!(unique.len(), chain.len(), "duplicate in chain of {}", node);

            // Every edge reachable from the root lands in the chain
            for member in chain {
                for dep in graph.edges_of(member).unwrap_or_default() {
                    assert!(chain.contains(dep), "{} missing from chain of {}", dep, node);
                }
            }
        }
    }

    #[test]
    fn test_deep_graph_does_not_overflow() {
        let depth = 100_000;
        let graph = Graph::from_iter((0..depth).map(|i| {
            let deps = if i + 1 < depth { vec![format!("n{}", i + 1)] } else { vec![] };
            (format!("n{}", i), deps)
        }));
        let resolver = DependencyResolver::new(&graph);

        let chain = resolver.resolve_node("n0").unwrap();
        assert_eq!(chain.len(), depth);
        assert_eq!(chain.last().map(String::as_str), Some("n99999"));
    }

    #[test]
    fn test_deep_cycle_detected() {
        let depth = 50_000;
        let graph = Graph::from_iter((0..depth).map(|i| {
            (format!("n{}", i), vec![format!("n{}", (i + 1) % depth)])
        }));
        let resolver = DependencyResolver::new(&graph);

        assert_eq!(
            resolver.resolve_node("n0"),
            Err(ResolveError::CircularDependency {
                from: "n49999".to_string(),
                to: "n0".to_string(),
            })
        );
    }
}
