use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A directory entry seen during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
}

impl Entry {
    /// Follows symlinks, like the rest of the scan.
    pub fn is_dir(&self) -> bool {
        self.path.is_dir()
    }

    /// Immediate entries of `dir` in directory-listing order.
    ///
    /// Fails with [`Error::ReadDir`] if the directory or any of its entries
    /// cannot be read.
    pub fn list(dir: &Path) -> Result<Vec<Entry>> {
        let read_err = |source| Error::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
            });
        }
        Ok(entries)
    }

    /// Immediate subdirectories of `dir`.
    pub fn list_dirs(dir: &Path) -> Result<Vec<Entry>> {
        Ok(Self::list(dir)?.into_iter().filter(Entry::is_dir).collect())
    }
}
