//! Plugin directory discovery for the two deployment layouts.
//!
//! # Standalone
//!
//! Plugin directories sit directly under the installation's plugins folder:
//!
//! ```text
//! plugins/
//! ├── uk.ac.diamond.scisoft.python_1.3.0/   <- collected
//! └── org.eclipse.core.runtime_3.10.0/
//! ```
//!
//! # Hosted
//!
//! Running from a development workspace, plugins live one level below each
//! version-control checkout, and an older layout groups checkouts under a
//! `scisoft` directory:
//!
//! ```text
//! workspace/
//! ├── dawnsci.git/
//! │   └── org.eclipse.dawnsci.analysis.api/   <- collected
//! └── scisoft/
//!     └── scisoft-core.git/
//!         └── uk.ac.diamond.scisoft.analysis/ <- collected
//! ```

mod discovery;

pub use discovery::{PluginDirResolver, find_plugin_dirs};

use serde::{Deserialize, Serialize};

/// Directory name suffix of a version-control checkout.
pub const CHECKOUT_SUFFIX: &str = ".git";

/// Legacy grouping directory holding further checkouts in the hosted layout.
pub const LEGACY_GROUP_DIR: &str = "scisoft";

/// Deployment layout of the tree being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Inside a development environment, with checkout directories.
    Hosted,
    /// An installed product.
    #[default]
    Standalone,
}

impl LayoutMode {
    pub fn from_hosted(hosted: bool) -> Self {
        if hosted { Self::Hosted } else { Self::Standalone }
    }

    pub fn is_hosted(self) -> bool {
        self == Self::Hosted
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hosted => write!(f, "hosted"),
            Self::Standalone => write!(f, "standalone"),
        }
    }
}
