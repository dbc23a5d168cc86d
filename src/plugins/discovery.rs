use std::path::{Path, PathBuf};

use super::{CHECKOUT_SUFFIX, LEGACY_GROUP_DIR, LayoutMode};
use crate::Result;
use crate::config::MatchLists;
use crate::entry::Entry;

pub struct PluginDirResolver<'a> {
    lists: &'a MatchLists,
}

impl<'a> PluginDirResolver<'a> {
    pub fn new(lists: &'a MatchLists) -> Self {
        Self { lists }
    }

    /// Finds plugin directories under `root` for the given layout.
    ///
    /// A missing or non-directory `root` yields an empty list.
    pub fn resolve(&self, root: &Path, mode: LayoutMode) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        match mode {
            LayoutMode::Standalone => self.plugins_in(root),
            LayoutMode::Hosted => {
                let mut plugins = Vec::new();
                for checkout in Self::checkouts(root)? {
                    plugins.extend(self.plugins_in(&checkout)?);
                }
                Ok(plugins)
            }
        }
    }

    /// Checkout directories directly under `root`, plus those one level
    /// inside a legacy `scisoft` grouping directory.
    fn checkouts(root: &Path) -> Result<Vec<PathBuf>> {
        let mut checkouts = Vec::new();

        for dir in Entry::list_dirs(root)? {
            if dir.name.ends_with(CHECKOUT_SUFFIX) {
                checkouts.push(dir.path);
            } else if dir.name == LEGACY_GROUP_DIR {
                for nested in Entry::list_dirs(&dir.path)? {
                    if nested.name.ends_with(CHECKOUT_SUFFIX) {
                        tracing::debug!(
                            "Adding {} directory {}",
                            LEGACY_GROUP_DIR,
                            nested.path.display()
                        );
                        checkouts.push(nested.path);
                    }
                }
            }
        }

        Ok(checkouts)
    }

    /// Immediate subdirectories of `dir` matching the plugin keys. No recursion.
    fn plugins_in(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut plugins = Vec::new();

        for entry in Entry::list_dirs(dir)? {
            if self.lists.is_plugin_dir(&entry.name) {
                tracing::debug!("Adding plugin directory {}", entry.path.display());
                plugins.push(entry.path);
            }
        }

        Ok(plugins)
    }
}

/// Shorthand for [`PluginDirResolver::resolve`].
pub fn find_plugin_dirs(
    root: &Path,
    lists: &MatchLists,
    mode: LayoutMode,
) -> Result<Vec<PathBuf>> {
    PluginDirResolver::new(lists).resolve(root, mode)
}
