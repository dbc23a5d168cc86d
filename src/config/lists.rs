//! Allow/deny name lists consulted while scanning an installation tree.
//!
//! [`MatchLists`] is passed explicitly to every scan, so the supplementary
//! `extraPlugins` list is ordinary configuration rather than process state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::provider::{ConfigProvider, ConfigProviderExt};
use super::ConfigResult;
use crate::matcher;

/// Archive name prefixes placed on the search path.
pub const REQUIRED_JARS: &[&str] = &[
    "org.python.pydev",
    "cbflib-0.9",
    "org.apache.commons.codec",
    "org.apache.commons.math", // math3 too
    "uk.ac.diamond.CBFlib",
    "uk.ac.diamond.jama",
    "uk.ac.diamond.ejml",
    "uk.ac.diamond.ddogleg",
    "org.apache.commons.lang",
    "org.eclipse.dawnsci.analysis",
    "uk.ac.diamond.scisoft.analysis",
    "uk.ac.diamond.scisoft.diffraction.powder",
    "uk.ac.diamond.scisoft.python",
    "uk.ac.diamond.scisoft.spectroscopy",
    "uk.ac.gda.common",
    "org.eclipse.dawnsci.hdf5",
    "slf4j.api",
    "jcl.over.slf4j",
    "log4j.over.slf4j",
    "ch.qos.logback.core",
    "ch.qos.logback.classic",
    "com.springsource.org.apache.commons",
    "com.springsource.javax.media.jai.core",
    "com.springsource.javax.media.jai.codec",
    "jtransforms",
    "jai_imageio",
    "it.tidalwave.imageio.raw",
    "javax.vecmath",
    "uk.ac.diamond.org.apache.ws.commons.util",
    "uk.ac.diamond.org.apache.xmlrpc.client",
    "uk.ac.diamond.org.apache.xmlrpc.common",
    "uk.ac.diamond.org.apache.xmlrpc.server",
    "com.thoughtworks.xstream",
    "uk.ac.diamond.org.jscience4",
];

/// Directory name prefixes whose whole subtree is skipped by the archive scan.
pub const BLACKLISTED_JAR_DIRS: &[&str] = &[
    "uk.ac.gda.libs",
    "ch.qos.logback.eclipse",
    "ch.qos.logback.beagle",
    "org.dawb.workbench.jmx",
    crate::plugins::CHECKOUT_SUFFIX,
    crate::locator::INTERPRETER_DIR,
];

/// Plugin directory name prefixes placed on the search path.
pub const PLUGIN_KEYS: &[&str] = &[
    "org.eclipse.dawnsci.hdf5",
    "org.eclipse.dawnsci.analysis",
    "uk.ac.diamond.scisoft.analysis",
    "uk.ac.diamond.scisoft.diffraction.powder",
    "uk.ac.diamond.scisoft.python",
    "uk.ac.diamond.CBFlib",
    "uk.ac.gda.common",
    "ncsa.hdf",
];

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

pub fn default_required_jars() -> Vec<String> {
    owned(REQUIRED_JARS)
}

pub fn default_blacklisted_jar_dirs() -> Vec<String> {
    owned(BLACKLISTED_JAR_DIRS)
}

pub fn default_plugin_keys() -> Vec<String> {
    owned(PLUGIN_KEYS)
}

/// The four name lists driving a scan.
///
/// Serialized with the option names `requiredJars`, `blackListedJarDirs`,
/// `pluginKeys` and `extraPlugins`. Fields missing from a document keep their
/// built-in defaults; `extraPlugins` defaults to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchLists {
    #[serde(rename = "requiredJars")]
    pub required_jars: Vec<String>,
    #[serde(rename = "blackListedJarDirs", alias = "blacklistedJarDirs")]
    pub blacklisted_jar_dirs: Vec<String>,
    #[serde(rename = "pluginKeys")]
    pub plugin_keys: Vec<String>,
    /// Applies to both archives and plugin directories.
    #[serde(rename = "extraPlugins")]
    pub extra_plugins: Vec<String>,
}

impl Default for MatchLists {
    fn default() -> Self {
        Self {
            required_jars: default_required_jars(),
            blacklisted_jar_dirs: default_blacklisted_jar_dirs(),
            plugin_keys: default_plugin_keys(),
            extra_plugins: Vec::new(),
        }
    }
}

impl MatchLists {
    pub const REQUIRED_JARS_KEY: &'static str = "requiredJars";
    pub const BLACKLISTED_JAR_DIRS_KEY: &'static str = "blackListedJarDirs";
    pub const PLUGIN_KEYS_KEY: &'static str = "pluginKeys";
    pub const EXTRA_PLUGINS_KEY: &'static str = "extraPlugins";

    pub fn new() -> Self {
        Self::default()
    }

    /// Lists with every allow/deny list empty.
    pub fn empty() -> Self {
        Self {
            required_jars: Vec::new(),
            blacklisted_jar_dirs: Vec::new(),
            plugin_keys: Vec::new(),
            extra_plugins: Vec::new(),
        }
    }

    pub fn with_required_jars<I, S>(mut self, jars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_jars = jars.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_blacklisted_jar_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklisted_jar_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_plugin_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plugin_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the supplementary allow-list.
    pub fn with_extra_plugins<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_plugins = extra.into_iter().map(Into::into).collect();
        self
    }

    /// Append one prefix to the supplementary allow-list.
    pub fn extra_plugin(mut self, prefix: impl Into<String>) -> Self {
        self.extra_plugins.push(prefix.into());
        self
    }

    pub fn is_required_jar(&self, name: &str) -> bool {
        matcher::matches_with_extra(name, &self.required_jars, &self.extra_plugins)
    }

    pub fn is_blacklisted_dir(&self, name: &str) -> bool {
        matcher::matches(name, &self.blacklisted_jar_dirs)
    }

    pub fn is_plugin_dir(&self, name: &str) -> bool {
        matcher::matches_with_extra(name, &self.plugin_keys, &self.extra_plugins)
    }

    /// Load lists from a JSON file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No match list file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Per-user location of the match list file, if a home directory exists.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("uk.ac", "diamond", "modpath")
            .map(|dirs| dirs.config_dir().join("search-path.json"))
    }

    /// Load from [`default_config_path`](Self::default_config_path), falling
    /// back to the defaults when there is no home directory or no file.
    pub fn load_default() -> ConfigResult<Self> {
        match Self::default_config_path() {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Build lists from a provider. Each key present must hold a JSON string
    /// array and replaces the corresponding default list.
    pub fn from_provider(provider: &dyn ConfigProvider) -> ConfigResult<Self> {
        let mut lists = Self::default();
        let slots = [
            (Self::REQUIRED_JARS_KEY, &mut lists.required_jars),
            (Self::BLACKLISTED_JAR_DIRS_KEY, &mut lists.blacklisted_jar_dirs),
            (Self::PLUGIN_KEYS_KEY, &mut lists.plugin_keys),
            (Self::EXTRA_PLUGINS_KEY, &mut lists.extra_plugins),
        ];
        for (key, slot) in slots {
            if let Some(values) = provider.get::<Vec<String>>(key)? {
                tracing::debug!(provider = provider.name(), key, "Overriding match list");
                *slot = values;
            }
        }
        Ok(lists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, MemoryConfigProvider};
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let lists = MatchLists::new();
        assert_eq!(lists.required_jars.len(), REQUIRED_JARS.len());
        assert!(lists.extra_plugins.is_empty());
        assert!(lists.blacklisted_jar_dirs.contains(&".git".to_string()));
        assert!(lists.blacklisted_jar_dirs.contains(&"jython2.5".to_string()));
        assert_eq!(lists.plugin_keys.last().map(String::as_str), Some("ncsa.hdf"));
    }

    #[test]
    fn test_predicates() {
        let lists = MatchLists::new();
        assert!(lists.is_required_jar("slf4j.api_1.7.2.jar"));
        assert!(!lists.is_required_jar("junit-4.12.jar"));
        assert!(lists.is_blacklisted_dir(".git"));
        assert!(lists.is_blacklisted_dir("uk.ac.gda.libs.extra"));
        assert!(!lists.is_blacklisted_dir("plugins"));
        assert!(lists.is_plugin_dir("uk.ac.diamond.scisoft.python"));
        assert!(!lists.is_plugin_dir("org.example.tools"));
    }

    #[test]
    fn test_extra_plugins_apply_to_both_lists() {
        let lists = MatchLists::new().extra_plugin("org.example");
        assert!(lists.is_required_jar("org.example.tools_1.0.jar"));
        assert!(lists.is_plugin_dir("org.example.tools"));
        assert!(!lists.is_blacklisted_dir("org.example.tools"));
        assert_eq!(lists.plugin_keys, default_plugin_keys());
    }

    #[test]
    fn test_serde_option_names() {
        let json = serde_json::to_value(MatchLists::empty().extra_plugin("x")).unwrap();
        assert!(json.get("requiredJars").is_some());
        assert!(json.get("blackListedJarDirs").is_some());
        assert!(json.get("pluginKeys").is_some());
        assert_eq!(json["extraPlugins"], serde_json::json!(["x"]));
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let lists: MatchLists =
            serde_json::from_str(r#"{"pluginKeys": ["only.this"], "extraPlugins": ["e"]}"#)
                .unwrap();
        assert_eq!(lists.plugin_keys, vec!["only.this".to_string()]);
        assert_eq!(lists.extra_plugins, vec!["e".to_string()]);
        assert_eq!(lists.required_jars, default_required_jars());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let lists = MatchLists::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(lists, MatchLists::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lists.json");
        std::fs::write(&path, r#"{"blacklistedJarDirs": ["skip"]}"#).unwrap();

        let lists = MatchLists::load(&path).unwrap();
        assert_eq!(lists.blacklisted_jar_dirs, vec!["skip".to_string()]);
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lists.json");
        std::fs::write(&path, r#"{"pluginKeys": 3}"#).unwrap();

        assert!(matches!(
            MatchLists::load(&path),
            Err(ConfigError::Serialization(_))
        ));
    }

    #[test]
    fn test_from_provider() {
        let provider = MemoryConfigProvider::new()
            .value("extraPlugins", r#"["org.example"]"#)
            .value("requiredJars", r#"["only"]"#);

        let lists = MatchLists::from_provider(&provider).unwrap();
        assert_eq!(lists.extra_plugins, vec!["org.example".to_string()]);
        assert_eq!(lists.required_jars, vec!["only".to_string()]);
        assert_eq!(lists.plugin_keys, default_plugin_keys());
    }

    #[test]
    fn test_from_provider_rejects_non_list() {
        let provider = MemoryConfigProvider::new().value("pluginKeys", "plain");
        assert!(matches!(
            MatchLists::from_provider(&provider),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
