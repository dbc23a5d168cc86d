//! The combined module search path: archives followed by plugin directories.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::Result;
use crate::archives::ArchiveCollector;
use crate::config::MatchLists;
use crate::locator::RootLocator;
use crate::plugins::{LayoutMode, PluginDirResolver};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    archives: Vec<PathBuf>,
    plugin_dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Scans `dir` for archives and plugin directories.
    ///
    /// Every call re-walks the filesystem; nothing is cached.
    pub fn resolve(dir: &Path, lists: &MatchLists, mode: LayoutMode) -> Result<Self> {
        let archives = ArchiveCollector::new(lists).collect(dir)?;
        let plugin_dirs = PluginDirResolver::new(lists).resolve(dir, mode)?;
        tracing::debug!(
            archives = archives.len(),
            plugin_dirs = plugin_dirs.len(),
            %mode,
            "Resolved search path under {}",
            dir.display()
        );
        Ok(Self {
            archives,
            plugin_dirs,
        })
    }

    /// Locates the plugins directory for `mode` and resolves it.
    pub fn discover(locator: &RootLocator, lists: &MatchLists, mode: LayoutMode) -> Result<Self> {
        let dir = locator.plugins_dir(mode)?;
        Self::resolve(&dir, lists, mode)
    }

    pub fn archives(&self) -> &[PathBuf] {
        &self.archives
    }

    pub fn plugin_dirs(&self) -> &[PathBuf] {
        &self.plugin_dirs
    }

    /// Archives first, then plugin directories, each in discovery order.
    pub fn entries(&self) -> impl Iterator<Item = &Path> {
        self.archives
            .iter()
            .chain(self.plugin_dirs.iter())
            .map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.archives.len() + self.plugin_dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the entries as a platform path list (`:` or `;` separated).
    pub fn to_os_string(&self) -> Result<OsString> {
        Ok(std::env::join_paths(self.entries())?)
    }
}

impl IntoIterator for SearchPath {
    type Item = PathBuf;
    type IntoIter = std::iter::Chain<std::vec::IntoIter<PathBuf>, std::vec::IntoIter<PathBuf>>;

    fn into_iter(self) -> Self::IntoIter {
        self.archives.into_iter().chain(self.plugin_dirs)
    }
}
