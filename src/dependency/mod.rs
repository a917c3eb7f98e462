//! Dependency resolution module
//!
//! This module provides the adjacency graph and the resolver that flattens
//! it into per-node dependency chains with cycle detection.

pub mod graph;
pub mod resolver;

pub use graph::{AdjacencyMap, Graph};
pub use resolver::{Chain, DependencyResolver, ResolveError, Traversal, UnknownNodePolicy};
