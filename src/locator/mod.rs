//! Locating the installation directories a scan starts from.
//!
//! A bundle is first looked up in the host [`BundleRegistry`]. When that
//! fails or knows nothing, the `<bundle>.location` property is read from the
//! configured [`ConfigProvider`] (the environment by default, where it appears
//! as e.g. `UK_AC_DIAMOND_JYTHON_LOCATION`). If neither yields a path the
//! lookup fails with [`Error::RootNotConfigured`]; there is no implicit default.

mod registry;

pub use registry::{BundleRegistry, PluginsDirRegistry, StaticBundleRegistry};

use std::path::{Path, PathBuf};

use crate::config::{ConfigProvider, EnvConfigProvider};
use crate::plugins::LayoutMode;
use crate::{Error, Result};

/// Bundle carrying the interpreter installation.
pub const INTERPRETER_BUNDLE: &str = "uk.ac.diamond.jython";
/// Interpreter installation folder inside [`INTERPRETER_BUNDLE`].
pub const INTERPRETER_DIR: &str = "jython2.5";
/// Bundle whose parent directory holds the plugins to scan.
pub const SCISOFT_PYTHON_BUNDLE: &str = "uk.ac.diamond.scisoft.python";

const LOCATION_SUFFIX: &str = ".location";

pub struct RootLocator {
    registry: Option<Box<dyn BundleRegistry>>,
    config: Box<dyn ConfigProvider>,
}

impl RootLocator {
    /// Locator with no registry, reading overrides from the environment.
    pub fn new() -> Self {
        Self {
            registry: None,
            config: Box::new(EnvConfigProvider::new()),
        }
    }

    pub fn registry<R: BundleRegistry + 'static>(mut self, registry: R) -> Self {
        self.registry = Some(Box::new(registry));
        self
    }

    pub fn config<C: ConfigProvider + 'static>(mut self, config: C) -> Self {
        self.config = Box::new(config);
        self
    }

    /// Name of the override property for `bundle`.
    pub fn location_property(bundle: &str) -> String {
        format!("{bundle}{LOCATION_SUFFIX}")
    }

    pub fn locate_bundle_root(&self, bundle: &str) -> Result<PathBuf> {
        if let Some(registry) = &self.registry {
            match registry.bundle_location(bundle) {
                Ok(Some(location)) => {
                    tracing::debug!("Bundle {} resolved by {} registry", bundle, registry.name());
                    return Ok(location);
                }
                Ok(None) => {
                    tracing::debug!("Bundle {} unknown to {} registry", bundle, registry.name());
                }
                Err(e) => {
                    tracing::warn!(
                        "Bundle lookup for {} failed in {} registry: {}",
                        bundle,
                        registry.name(),
                        e
                    );
                }
            }
        }

        let property = Self::location_property(bundle);
        match self.config.get_path(&property)? {
            Some(value) if !Self::is_blank(&value) => {
                tracing::debug!(
                    "Bundle {} located via {} ({})",
                    bundle,
                    property,
                    self.config.name()
                );
                Ok(value)
            }
            _ => Err(Error::RootNotConfigured {
                bundle: bundle.to_string(),
                property,
            }),
        }
    }

    // Empty or whitespace-only overrides count as unset; anything else is used verbatim.
    fn is_blank(value: &Path) -> bool {
        let raw = value.as_os_str();
        raw.is_empty() || raw.to_str().is_some_and(|s| s.trim().is_empty())
    }

    /// The interpreter installation folder inside its bundle.
    pub fn interpreter_dir(&self) -> Result<PathBuf> {
        let dir = self.locate_bundle_root(INTERPRETER_BUNDLE)?.join(INTERPRETER_DIR);
        tracing::info!("Interpreter bundle found at: {}", dir.display());
        Ok(dir)
    }

    /// Directory holding the plugins: the parent of the scientific-python
    /// bundle, or in the hosted layout the workspace one level further up.
    pub fn plugins_dir(&self, mode: LayoutMode) -> Result<PathBuf> {
        let bundle = self.locate_bundle_root(SCISOFT_PYTHON_BUNDLE)?;
        let levels = if mode.is_hosted() { 2 } else { 1 };
        let dir = Self::ancestor(&bundle, levels)?;
        tracing::info!("Plugins directory ({mode}) found at: {}", dir.display());
        Ok(dir)
    }

    fn ancestor(path: &Path, levels: usize) -> Result<PathBuf> {
        path.ancestors()
            .nth(levels)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::NoParent {
                path: path.to_path_buf(),
            })
    }
}

impl Default for RootLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RootLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootLocator")
            .field("registry", &self.registry.as_ref().map(|r| r.name()))
            .field("config", &self.config.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryConfigProvider;

    struct FailingRegistry;

    impl BundleRegistry for FailingRegistry {
        fn name(&self) -> &str {
            "failing"
        }

        fn bundle_location(&self, _bundle: &str) -> Result<Option<PathBuf>> {
            Err(Error::Registry("registry offline".into()))
        }
    }

    fn no_overrides() -> MemoryConfigProvider {
        MemoryConfigProvider::new()
    }

    #[test]
    fn test_location_property() {
        assert_eq!(
            RootLocator::location_property(INTERPRETER_BUNDLE),
            "uk.ac.diamond.jython.location"
        );
    }

    #[test]
    fn test_registry_wins() {
        let locator = RootLocator::new()
            .registry(StaticBundleRegistry::new().bundle("b", "/from/registry"))
            .config(MemoryConfigProvider::new().value("b.location", "/from/config"));

        assert_eq!(
            locator.locate_bundle_root("b").unwrap(),
            PathBuf::from("/from/registry")
        );
    }

    #[test]
    fn test_falls_back_to_override() {
        let locator = RootLocator::new()
            .registry(StaticBundleRegistry::new())
            .config(MemoryConfigProvider::new().value("b.location", "/from/config"));

        assert_eq!(
            locator.locate_bundle_root("b").unwrap(),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn test_registry_error_recovered() {
        let locator = RootLocator::new()
            .registry(FailingRegistry)
            .config(MemoryConfigProvider::new().value("b.location", "/from/config"));

        assert_eq!(
            locator.locate_bundle_root("b").unwrap(),
            PathBuf::from("/from/config")
        );
    }

    #[test]
    fn test_missing_everywhere_is_config_error() {
        let locator = RootLocator::new().registry(FailingRegistry).config(no_overrides());

        let err = locator.locate_bundle_root("b").unwrap_err();
        assert!(err.is_configuration_error());
        assert!(matches!(
            err,
            Error::RootNotConfigured { ref bundle, ref property }
                if bundle == "b" && property == "b.location"
        ));
        assert!(err.to_string().contains("b.location"));
    }

    #[test]
    fn test_blank_override_is_missing() {
        let locator =
            RootLocator::new().config(MemoryConfigProvider::new().value("b.location", "  "));
        assert!(matches!(
            locator.locate_bundle_root("b"),
            Err(Error::RootNotConfigured { .. })
        ));
    }

    #[test]
    fn test_empty_override_is_missing() {
        let locator =
            RootLocator::new().config(MemoryConfigProvider::new().value("b.location", ""));
        assert!(matches!(
            locator.locate_bundle_root("b"),
            Err(Error::RootNotConfigured { .. })
        ));
    }

    #[test]
    fn test_override_used_verbatim() {
        let locator =
            RootLocator::new().config(MemoryConfigProvider::new().value("b.location", " /opt/b "));
        assert_eq!(
            locator.locate_bundle_root("b").unwrap(),
            PathBuf::from(" /opt/b ")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_env_override() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"/opt/caf\xe9".to_vec());
        // SAFETY: Test-only environment setup; the variable name is unique to this test.
        unsafe { std::env::set_var("MODPATH_LOCATOR_TEST_B_LOCATION", &raw) };

        let locator =
            RootLocator::new().config(EnvConfigProvider::prefixed("MODPATH_LOCATOR_TEST_"));
        let root = locator.locate_bundle_root("b");
        unsafe { std::env::remove_var("MODPATH_LOCATOR_TEST_B_LOCATION") };

        assert_eq!(root.unwrap(), PathBuf::from(raw));
    }

    #[test]
    fn test_interpreter_dir() {
        let locator = RootLocator::new().config(
            MemoryConfigProvider::new().value("uk.ac.diamond.jython.location", "/opt/jython"),
        );
        assert_eq!(
            locator.interpreter_dir().unwrap(),
            PathBuf::from("/opt/jython/jython2.5")
        );
    }

    #[test]
    fn test_plugins_dir_by_mode() {
        let locator = RootLocator::new().registry(
            StaticBundleRegistry::new()
                .bundle(SCISOFT_PYTHON_BUNDLE, "/ws/scisoft-core.git/uk.ac.diamond.scisoft.python"),
        );

        assert_eq!(
            locator.plugins_dir(LayoutMode::Standalone).unwrap(),
            PathBuf::from("/ws/scisoft-core.git")
        );
        assert_eq!(
            locator.plugins_dir(LayoutMode::Hosted).unwrap(),
            PathBuf::from("/ws")
        );
    }

    #[test]
    fn test_plugins_dir_without_parent() {
        let locator = RootLocator::new()
            .registry(StaticBundleRegistry::new().bundle(SCISOFT_PYTHON_BUNDLE, "bundle"));

        assert!(matches!(
            locator.plugins_dir(LayoutMode::Standalone),
            Err(Error::NoParent { .. })
        ));
    }
}
