//! Configuration validation with helpful error messages

use anyhow::Result;

use super::DepchainConfig;
use crate::error::DepchainError;

/// Validate the entire configuration
pub fn validate_config(config: &DepchainConfig) -> Result<()> {
    validate_separator(&config.resolve.separator)?;

    if let Some(ref input) = config.resolve.input {
        if input.as_os_str().is_empty() {
            return Err(DepchainError::config_error_with_hint(
                "[resolve] input cannot be empty",
                None,
                "Remove the key to use the default, or point it at a JSON file",
            )
            .into());
        }
    }

    Ok(())
}

fn validate_separator(separator: &str) -> Result<()> {
    if separator.is_empty() {
        return Err(DepchainError::config_error("[resolve] separator cannot be empty").into());
    }

    if separator.contains('\n') {
        return Err(DepchainError::config_error(
            "[resolve] separator cannot contain a newline; each chain is printed on one line",
        )
        .into());
    }

    Ok(())
}
