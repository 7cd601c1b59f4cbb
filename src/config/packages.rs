//! Package manifest location.
use std::path::{Path, PathBuf};

/// Package manager binary that consumes the manifest.
pub const PACKAGE_MANAGER: &str = "brew";

/// Manifest path relative to the repository root.
pub const MANIFEST_PATH: &str = "brewfile/Brewfile";

/// The bundled package manifest.
///
/// Opaque to the installer: only its path is handed to the package manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    /// Package manager binary name.
    pub manager: String,
    /// Absolute manifest path.
    pub path: PathBuf,
}

impl PackageManifest {
    /// The manifest bundled in the repository at `root`.
    #[must_use]
    pub fn in_repo(root: &Path) -> Self {
        Self {
            manager: PACKAGE_MANAGER.to_string(),
            path: root.join(MANIFEST_PATH),
        }
    }

    /// Arguments for installing everything the manifest declares.
    #[must_use]
    pub fn install_args(&self) -> Vec<String> {
        vec![
            "bundle".to_string(),
            "install".to_string(),
            "--file".to_string(),
            self.path.to_string_lossy().into_owned(),
        ]
    }
}
