//! Error types and helpers for user-friendly error messages
//!
//! This module provides the user-facing error type with actionable hints.
//! The resolver's own error type lives in [`crate::dependency::ResolveError`].

use std::path::PathBuf;

use thiserror::Error;

use crate::dependency::ResolveError;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum DepchainError {
    /// The dependency data could not be read or parsed
    #[error("Failed to load '{}': {message}", .path.display())]
    Input {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Configuration file errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Dependency resolution failed
    #[error("{source}")]
    Resolve {
        #[source]
        source: ResolveError,
        hint: Option<String>,
    },
}

impl DepchainError {
    /// Create an input error
    pub fn input_error(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
            source,
            hint: None,
        }
    }

    /// Create an input error with a hint
    pub fn input_error_with_hint(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Hint to show alongside the error, if any
    pub fn hint(&self) -> Option<&str> {
        match self {
            DepchainError::Input { hint, .. }
            | DepchainError::Config { hint, .. }
            | DepchainError::Resolve { hint, .. } => hint.as_deref(),
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        if let Some(h) = self.hint() {
            eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
        }

        eprintln!();
    }
}

impl From<ResolveError> for DepchainError {
    fn from(source: ResolveError) -> Self {
        let hint = match &source {
            ResolveError::CircularDependency { .. } => hints::circular_dependency(),
            ResolveError::UnknownNode { .. } => hints::unknown_node(),
            ResolveError::NodeNotFound { .. } => hints::node_not_found(),
        };

        Self::Resolve {
            source,
            hint: Some(hint.to_string()),
        }
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for a missing input file
    pub fn input_not_found() -> &'static str {
        "Pass the dependency file explicitly:\n\
         • Run: depchain resolve path/to/deps.json\n\
         • Or set `input` under [resolve] in Depchain.toml"
    }

    /// Get hint for malformed dependency JSON
    pub fn invalid_json() -> &'static str {
        "The dependency file must be a JSON object mapping each node to a list of names:\n\
         {\"app\": [\"fmt\", \"spdlog\"], \"fmt\": [], \"spdlog\": [\"fmt\"]}"
    }

    /// Get hint for invalid Depchain.toml
    pub fn invalid_config() -> &'static str {
        "Depchain.toml is invalid. Supported keys:\n\
         [resolve]\n\
         input = \"deps.json\"\n\
         unknown_nodes = \"lenient\"   # or \"strict\"\n\
         separator = \" -> \""
    }

    /// Get hint for a dependency cycle
    pub fn circular_dependency() -> &'static str {
        "Break the cycle by removing one of the edges listed above.\n\
         Run: depchain graph to inspect the declared dependencies"
    }

    /// Get hint for an undeclared edge target in strict mode
    pub fn unknown_node() -> &'static str {
        "Declare the dependency as a node (an empty list is fine),\n\
         or rerun with --lenient to treat undeclared dependencies as leaves"
    }

    /// Get hint for a start node that is not declared
    pub fn node_not_found() -> &'static str {
        "Run: depchain graph to list the declared nodes"
    }
}
