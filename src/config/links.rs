//! The fixed link table.
use std::path::{Path, PathBuf};

/// A link to create: `home/destination` → `root/source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSpec {
    /// Path relative to the repository root.
    pub source: &'static str,
    /// Path relative to the home directory.
    pub destination: &'static str,
}

impl LinkSpec {
    /// Absolute path of the link's source inside the repository.
    #[must_use]
    pub fn source_path(&self, root: &Path) -> PathBuf {
        root.join(self.source)
    }

    /// Absolute path where the link is created.
    #[must_use]
    pub fn destination_path(&self, home: &Path) -> PathBuf {
        home.join(self.destination)
    }
}

/// Every link the installer manages, in creation order.
pub const LINKS: &[LinkSpec] = &[
    LinkSpec {
        source: "ghostty",
        destination: ".config/ghostty",
    },
    LinkSpec {
        source: "tmux/tmux.conf",
        destination: ".tmux.conf",
    },
    LinkSpec {
        source: "fish",
        destination: ".config/fish",
    },
    LinkSpec {
        source: "starship",
        destination: ".config/starship",
    },
    LinkSpec {
        source: "nvim",
        destination: ".config/nvim",
    },
];
