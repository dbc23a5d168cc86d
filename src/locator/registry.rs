//! Host bundle registries consulted before the location override.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Resolves a bundle identifier to its installed location.
///
/// `Ok(None)` means the registry does not know the bundle. Errors are
/// recovered by the [`RootLocator`](super::RootLocator), which then falls back
/// to the location override.
pub trait BundleRegistry: Send + Sync {
    fn name(&self) -> &str;

    fn bundle_location(&self, bundle: &str) -> Result<Option<PathBuf>>;
}

/// Registry backed by an explicit identifier to path map.
#[derive(Debug, Clone, Default)]
pub struct StaticBundleRegistry {
    bundles: HashMap<String, PathBuf>,
}

impl StaticBundleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bundle(mut self, id: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        self.bundles.insert(id.into(), location.into());
        self
    }
}

impl BundleRegistry for StaticBundleRegistry {
    fn name(&self) -> &str {
        "static"
    }

    fn bundle_location(&self, bundle: &str) -> Result<Option<PathBuf>> {
        Ok(self.bundles.get(bundle).cloned())
    }
}

/// Registry over an installed `plugins/` directory, where bundles are
/// deployed as `<id>` or `<id>_<version>`.
///
/// An unversioned entry wins; otherwise the entry with the highest version
/// is returned, comparing dot-separated segments numerically where both are
/// numbers (`1.10.0` is newer than `1.9.0`) and as text otherwise (Eclipse
/// qualifiers such as `1.2.0.v2015`).
#[derive(Debug, Clone)]
pub struct PluginsDirRegistry {
    dir: PathBuf,
}

impl PluginsDirRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn versioned_pattern(&self, bundle: &str) -> String {
        format!(
            "{}/{}_*",
            glob::Pattern::escape(&self.dir.to_string_lossy()),
            glob::Pattern::escape(bundle)
        )
    }
}

impl BundleRegistry for PluginsDirRegistry {
    fn name(&self) -> &str {
        "plugins-dir"
    }

    fn bundle_location(&self, bundle: &str) -> Result<Option<PathBuf>> {
        if !self.dir.is_dir() {
            return Ok(None);
        }

        let exact = self.dir.join(bundle);
        if exact.exists() {
            return Ok(Some(exact));
        }

        let pattern = self.versioned_pattern(bundle);
        let paths = glob::glob(&pattern)
            .map_err(|e| Error::Registry(format!("invalid bundle pattern {pattern}: {e}")))?;

        let prefix = format!("{bundle}_");
        let mut newest: Option<(BundleVersion, PathBuf)> = None;
        for path in paths {
            let path = path.map_err(|e| Error::Registry(e.to_string()))?;
            let Some(version) = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix(&prefix))
                .map(BundleVersion::parse)
            else {
                continue;
            };
            if newest.as_ref().is_none_or(|(v, _)| version > *v) {
                newest = Some((version, path));
            }
        }
        Ok(newest.map(|(_, path)| path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Segment {
    Number(u64),
    Text(String),
}

/// Lenient bundle version: numeric segments order below textual ones, and a
/// shorter version orders below one it is a prefix of.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct BundleVersion(Vec<Segment>);

impl BundleVersion {
    fn parse(version: &str) -> Self {
        Self(
            version
                .split('.')
                .map(|part| match part.parse::<u64>() {
                    Ok(n) if part.bytes().all(|b| b.is_ascii_digit()) => Segment::Number(n),
                    _ => Segment::Text(part.to_string()),
                })
                .collect(),
        )
    }
}
