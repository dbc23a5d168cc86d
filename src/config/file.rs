//! File-based Configuration Provider
//!
//! Loads configuration from a JSON document. Nested objects are addressed
//! with dot notation; non-string values are returned as their JSON text so
//! that list-valued keys decode through [`ConfigProviderExt::get`].
//!
//! [`ConfigProviderExt::get`]: super::ConfigProviderExt::get

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::provider::ConfigProvider;
use super::{ConfigError, ConfigResult};

type Document = HashMap<String, serde_json::Value>;

/// File-based configuration provider
pub struct FileConfigProvider {
    /// Path to the configuration file
    path: PathBuf,
    /// Cached data
    data: RwLock<Option<Document>>,
}

impl FileConfigProvider {
    /// Create a new file provider; the file is read on first access.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(None),
        }
    }

    fn load(&self) -> ConfigResult<Document> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let data: Document = serde_json::from_str(&content)?;
        Ok(data)
    }

    fn poisoned() -> ConfigError {
        ConfigError::Provider {
            message: "file provider cache lock poisoned".into(),
        }
    }

    fn with_data<R>(&self, f: impl FnOnce(&Document) -> R) -> ConfigResult<R> {
        {
            let data = self.data.read().map_err(|_| Self::poisoned())?;
            if let Some(ref map) = *data {
                return Ok(f(map));
            }
        }

        let mut data = self.data.write().map_err(|_| Self::poisoned())?;
        if data.is_none() {
            *data = Some(self.load()?);
        }
        Ok(f(data.get_or_insert_with(HashMap::new)))
    }

    /// Re-read the file, discarding any cached values.
    pub fn reload(&self) -> ConfigResult<()> {
        let fresh = self.load()?;
        let mut data = self.data.write().map_err(|_| Self::poisoned())?;
        *data = Some(fresh);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigProvider for FileConfigProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn get_raw(&self, key: &str) -> ConfigResult<Option<String>> {
        self.with_data(|map| {
            // Dotted keys such as bundle properties may be stored flat.
            let current = map.get(key).or_else(|| {
                let mut parts = key.split('.');
                let first = parts.next().and_then(|p| map.get(p));
                parts.fold(first, |value, part| value.and_then(|v| v.get(part)))
            });

            match current {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(v) => Some(v.to_string()),
                None => None,
            }
        })
    }
}

impl std::fmt::Debug for FileConfigProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfigProvider")
            .field("path", &self.path)
            .finish()
    }
}
