//! Dependency graph data structures
//!
//! Provides the immutable adjacency structure that the resolver walks.

use std::fmt;

use indexmap::IndexMap;

/// Raw adjacency data as it comes out of a loader: node name to ordered
/// dependency names, in document order.
pub type AdjacencyMap = IndexMap<String, Vec<String>>;

/// Directed dependency graph
///
/// Each key is a node; its value is the ordered list of nodes it depends on.
/// Edge targets are not required to be keys themselves. The graph is never
/// mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: AdjacencyMap,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from loader output
    ///
    /// `None` and an empty map both produce a graph with zero nodes. Dangling
    /// edges are kept as-is; they are only noticed during traversal.
    pub fn build(data: Option<AdjacencyMap>) -> Self {
        let mut adjacency = AdjacencyMap::new();

        for (node, deps) in data.into_iter().flatten() {
            adjacency.entry(node).or_default().extend(deps);
        }

        Self { adjacency }
    }

    /// Node names that were declared as keys, in insertion order
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.adjacency.keys().map(String::as_str)
    }

    /// Declared dependencies of `node`, or `None` if it was never a key
    pub fn edges_of(&self, node: &str) -> Option<&[String]> {
        self.adjacency.get(node).map(Vec::as_slice)
    }

    /// Whether `node` was declared as a key
    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Number of declared nodes
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Whether the graph has no declared nodes
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Edges `(from, to)` whose target has no adjacency entry, in declaration order
    pub fn dangling_edges(&self) -> Vec<(&str, &str)> {
        self.adjacency
            .iter()
            .flat_map(|(from, deps)| deps.iter().map(move |to| (from.as_str(), to.as_str())))
            .filter(|(_, to)| !self.contains(to))
            .collect()
    }

    /// The graph-owned copy of a declared node name
    pub(crate) fn key(&self, node: &str) -> Option<&str> {
        self.adjacency.get_key_value(node).map(|(key, _)| key.as_str())
    }
}

impl<N, I, D> FromIterator<(N, I)> for Graph
where
    N: Into<String>,
    I: IntoIterator<Item = D>,
    D: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let data = iter
            .into_iter()
            .map(|(node, deps)| {
                let deps: Vec<String> = deps.into_iter().map(Into::into).collect();
                (node.into(), deps)
            })
            .collect::<AdjacencyMap>();

        Self::build(Some(data))
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (node, deps) in &self.adjacency {
            writeln!(f, "{} -> [{}]", node, deps.join(", "))?;
        }
        Ok(())
    }
}
