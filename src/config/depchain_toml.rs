//! Depchain.toml configuration parsing
//!
//! ```toml
//! [resolve]
//! input = "deps.json"
//! unknown_nodes = "strict"
//! separator = " -> "
//! ```
//!
//! A relative `input` is resolved against the directory holding the config
//! file, not the current directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::validation::validate_config;
use crate::dependency::UnknownNodePolicy;
use crate::error::{hints, DepchainError};
use crate::loader::DEFAULT_INPUT;

/// Name of the configuration file searched for from the current directory upward
pub const CONFIG_FILE: &str = "Depchain.toml";

/// Root configuration from Depchain.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepchainConfig {
    /// Resolution settings
    #[serde(default)]
    pub resolve: ResolveConfig,

    /// Directory of the file this config was loaded from
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// The [resolve] section
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveConfig {
    /// Dependency JSON file
    pub input: Option<PathBuf>,

    /// What to do with dependencies that are not declared as nodes
    #[serde(default)]
    pub unknown_nodes: UnknownNodePolicy,

    /// Separator between chain entries in text output
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    " -> ".to_string()
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            input: None,
            unknown_nodes: UnknownNodePolicy::default(),
            separator: default_separator(),
        }
    }
}

impl DepchainConfig {
    /// Load Depchain.toml from the current directory or a parent, falling
    /// back to defaults when there is none
    pub fn discover() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;

        match Self::find_config_from(&current_dir) {
            Some(path) => Self::load_from_path(path),
            None => {
                tracing::debug!("No {} found, using defaults", CONFIG_FILE);
                Ok(Self::default())
            }
        }
    }

    /// Find Depchain.toml by searching up from `start`
    pub fn find_config_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading configuration");

        let content = std::fs::read_to_string(path).map_err(|err| {
            DepchainError::config_error_with_hint(
                format!("Failed to read {}: {}", path.display(), err),
                Some(err.into()),
                hints::invalid_config(),
            )
        })?;

        let mut config = Self::parse(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|err| {
            DepchainError::config_error_with_hint(
                format!("Failed to parse {}: {}", CONFIG_FILE, err.message()),
                Some(err.into()),
                hints::invalid_config(),
            )
        })?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Input file to load when none is given on the command line
    pub fn input_path(&self) -> PathBuf {
        match (&self.resolve.input, &self.base_dir) {
            (Some(input), Some(base)) if input.is_relative() => base.join(input),
            (Some(input), _) => input.clone(),
            (None, _) => PathBuf::from(DEFAULT_INPUT),
        }
    }
}
