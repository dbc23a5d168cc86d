//! # modpath
//!
//! Resolves, at startup, the library archives and plugin directories to put
//! on an embedded interpreter's module search path.
//!
//! A scan starts from an installation directory and keeps the entries whose
//! names start with a configured prefix ([`MatchLists`]). Two layouts are
//! understood: an installed product, where plugins sit directly under the
//! plugins folder, and a development workspace, where they sit one level
//! below each version-control checkout ([`LayoutMode`]).
//!
//! ```rust,no_run
//! use modpath::{LayoutMode, MatchLists, RootLocator, SearchPath};
//!
//! # fn main() -> Result<(), modpath::Error> {
//! let locator = RootLocator::new();
//! let lists = MatchLists::new().extra_plugin("org.example");
//! let path = SearchPath::discover(&locator, &lists, LayoutMode::Standalone)?;
//! for entry in path.entries() {
//!     println!("{}", entry.display());
//! }
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod archives;
pub mod config;
mod entry;
pub mod locator;
pub mod matcher;
pub mod plugins;
pub mod search_path;

use std::path::PathBuf;

pub use archives::{ARCHIVE_SUFFIX, ArchiveCollector, find_archives};
pub use config::{ConfigError, ConfigProvider, MatchLists};
pub use entry::Entry;
pub use locator::{
    BundleRegistry, INTERPRETER_BUNDLE, INTERPRETER_DIR, PluginsDirRegistry, RootLocator,
    SCISOFT_PYTHON_BUNDLE, StaticBundleRegistry,
};
pub use matcher::{matches, matches_with_extra};
pub use plugins::{
    CHECKOUT_SUFFIX, LEGACY_GROUP_DIR, LayoutMode, PluginDirResolver, find_plugin_dirs,
};
pub use search_path::SearchPath;

/// Error type for search path resolution.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Neither the bundle registry nor the override property located a bundle.
    #[error("Cannot locate bundle '{bundle}': set the '{property}' property")]
    RootNotConfigured { bundle: String, property: String },

    /// A directory that exists could not be listed.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A plugins directory cannot be derived from a bundle location.
    #[error("Bundle location {} has no parent directory", path.display())]
    NoParent { path: PathBuf },

    /// Bundle registry lookup failed.
    #[error("Bundle registry error: {0}")]
    Registry(String),

    /// Invalid or unreadable configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A search path entry cannot be joined into a path list.
    #[error("Cannot join search path: {0}")]
    JoinPaths(#[from] std::env::JoinPathsError),
}

/// Error category for unified error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or invalid configuration; fix the setup rather than retry.
    Configuration,
    /// Filesystem or host environment failures.
    Io,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::RootNotConfigured { .. } | Error::Config(_) | Error::NoParent { .. } => {
                ErrorCategory::Configuration
            }
            Error::ReadDir { .. } | Error::Registry(_) | Error::JoinPaths(_) => ErrorCategory::Io,
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }
}

/// Result type alias for modpath operations.
pub type Result<T> = std::result::Result<T, Error>;
