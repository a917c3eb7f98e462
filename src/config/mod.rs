//! Configuration handling
//!
//! Depchain.toml is optional; every setting has a default and can be
//! overridden on the command line.

pub mod depchain_toml;
pub mod validation;

pub use depchain_toml::{DepchainConfig, ResolveConfig, CONFIG_FILE};
