//! Recursive collection of library archives.
//!
//! A directory whose name matches the deny-list is pruned at its root: none of
//! its descendants are collected, even ones matching the allow-list.

use std::path::{Path, PathBuf};

use crate::Result;
use crate::config::MatchLists;
use crate::entry::Entry;

/// File name suffix identifying a library archive.
pub const ARCHIVE_SUFFIX: &str = ".jar";

pub struct ArchiveCollector<'a> {
    lists: &'a MatchLists,
}

impl<'a> ArchiveCollector<'a> {
    pub fn new(lists: &'a MatchLists) -> Self {
        Self { lists }
    }

    /// Collects matching archives below `root`, depth-first in listing order.
    ///
    /// A missing or non-directory `root` yields an empty list. Depth is
    /// unbounded and symlinked directories are followed, so the tree must be
    /// free of cycles.
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut archives = Vec::new();
        if root.is_dir() {
            self.scan(root, &mut archives)?;
        }
        Ok(archives)
    }

    fn scan(&self, dir: &Path, archives: &mut Vec<PathBuf>) -> Result<()> {
        for entry in Entry::list(dir)? {
            if entry.name.ends_with(ARCHIVE_SUFFIX) {
                if self.lists.is_required_jar(&entry.name) {
                    archives.push(entry.path);
                }
            } else if entry.is_dir() {
                if self.lists.is_blacklisted_dir(&entry.name) {
                    tracing::trace!("Skipping blacklisted directory {}", entry.path.display());
                } else {
                    self.scan(&entry.path, archives)?;
                }
            }
        }
        Ok(())
    }
}

/// Shorthand for [`ArchiveCollector::collect`].
pub fn find_archives(root: &Path, lists: &MatchLists) -> Result<Vec<PathBuf>> {
    ArchiveCollector::new(lists).collect(root)
}
