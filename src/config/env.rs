//! Environment Variable Configuration Provider
//!
//! Provides read-only access to configuration via environment variables.
//! A dotted key such as `uk.ac.diamond.jython.location` is looked up as
//! `UK_AC_DIAMOND_JYTHON_LOCATION`.

use std::path::PathBuf;

use super::provider::ConfigProvider;
use super::{ConfigError, ConfigResult};

/// Read-only environment variable configuration provider.
///
/// Environment variables are treated as immutable at runtime because
/// modifying them is not thread-safe (requires unsafe in Rust 1.80+).
#[derive(Debug, Clone)]
pub struct EnvConfigProvider {
    prefix: Option<String>,
}

impl EnvConfigProvider {
    /// Create a new environment provider with no prefix
    pub fn new() -> Self {
        Self { prefix: None }
    }

    /// Create an environment provider with a prefix
    pub fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }

    /// Get the full environment variable name
    pub fn env_key(&self, key: &str) -> String {
        let base = key.to_uppercase().replace(['.', '-'], "_");
        match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, base),
            None => base,
        }
    }
}

impl Default for EnvConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn name(&self) -> &str {
        "env"
    }

    fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        let env_key = self.env_key(key);
        match std::env::var(&env_key) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::Env(e)),
        }
    }

    /// Reads the variable as an OS string, so non-UTF-8 paths are kept.
    fn get_path(&self, key: &str) -> ConfigResult<Option<PathBuf>> {
        Ok(std::env::var_os(self.env_key(key)).map(PathBuf::from))
    }
}
