//! depchain - flattened dependency chains with cycle detection
//!
//! Every node of a dependency graph is expanded into its chain: the node
//! itself followed by its transitive dependencies in depth-first discovery
//! order, each listed once.
//!
//! ```
//! use depchain::dependency::{DependencyResolver, Graph};
//!
//! let graph = Graph::from_iter([("app", vec!["fmt"]), ("fmt", vec![])]);
//! let mut resolver = DependencyResolver::new(&graph);
//! let chains = resolver.resolve_all().unwrap();
//! assert_eq!(chains[0], vec!["app".to_string(), "fmt".to_string()]);
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod dependency;
pub mod error;
pub mod loader;
pub mod output;
pub mod utils;
