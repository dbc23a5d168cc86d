//! Configuration Provider Trait

use std::path::PathBuf;

use serde::de::DeserializeOwned;

use super::ConfigResult;

/// Read-only source of configuration values.
///
/// Values are plain strings; structured values (lists) are JSON encoded and
/// decoded through [`ConfigProviderExt::get`].
pub trait ConfigProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &str;

    /// Get a raw configuration value
    fn get_raw(&self, key: &str) -> ConfigResult<Option<String>>;

    /// Get a value naming a filesystem path.
    ///
    /// Sources that hold OS strings override this so paths that are not
    /// valid UTF-8 survive unchanged.
    fn get_path(&self, key: &str) -> ConfigResult<Option<PathBuf>> {
        Ok(self.get_raw(key)?.map(PathBuf::from))
    }
}

/// Extension methods for typed configuration access
pub trait ConfigProviderExt: ConfigProvider {
    /// Get a typed configuration value
    fn get<T: DeserializeOwned>(&self, key: &str) -> ConfigResult<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => {
                let value: T =
                    serde_json::from_str(&raw).map_err(|e| super::ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get a typed value, failing when the key is absent.
    fn require<T: DeserializeOwned>(&self, key: &str) -> ConfigResult<T> {
        self.get(key)?.ok_or_else(|| super::ConfigError::NotFound {
            key: key.to_string(),
        })
    }
}

impl<P: ConfigProvider + ?Sized> ConfigProviderExt for P {}
