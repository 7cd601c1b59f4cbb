//! Resolved configuration for one run: repository, home and the link table.
pub mod links;
pub mod packages;

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use links::{LINKS, LinkSpec};
use packages::PackageManifest;

/// Config root relative to the home directory.
pub const CONFIG_DIR: &str = ".config";

/// All configuration needed by the tasks.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute repository root.
    pub root: PathBuf,
    /// Home directory links are created under.
    pub home: PathBuf,
    /// Links to manage, in order.
    pub links: Vec<LinkSpec>,
    /// Package manifest bundled with the repository.
    pub manifest: PackageManifest,
}

impl Config {
    /// Build the configuration for the repository at `root` and the given home.
    ///
    /// The root is canonicalised when it exists so that link targets are
    /// absolute; a missing root is kept as-is and surfaces later as missing
    /// sources.
    #[must_use]
    pub fn new(root: &Path, home: &Path) -> Self {
        let root = dunce::canonicalize(root)
            .or_else(|_| std::path::absolute(root))
            .unwrap_or_else(|_| root.to_path_buf());
        Self {
            manifest: PackageManifest::in_repo(&root),
            links: LINKS.to_vec(),
            home: home.to_path_buf(),
            root,
        }
    }

    /// Directory that must exist before any link is created.
    #[must_use]
    pub fn config_root(&self) -> PathBuf {
        self.home.join(CONFIG_DIR)
    }

    /// `(source, destination)` absolute path pairs for every link.
    #[must_use]
    pub fn link_paths(&self) -> Vec<(PathBuf, PathBuf)> {
        self.links
            .iter()
            .map(|l| (l.source_path(&self.root), l.destination_path(&self.home)))
            .collect()
    }
}

/// Whether `dir` looks like the dotfiles repository.
#[must_use]
pub fn is_repo_root(dir: &Path) -> bool {
    LINKS.iter().any(|l| l.source_path(dir).exists())
}

/// Resolve the dotfiles root from CLI arguments or auto-detection.
///
/// Order: explicit `--root`, `DOTFILES_ROOT`, the repository containing the
/// running binary, then the current directory.
///
/// # Errors
///
/// Returns an error if no candidate looks like the repository.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf> {
    find_root(
        explicit,
        std::env::var_os("DOTFILES_ROOT").map(PathBuf::from),
        std::env::current_exe().ok(),
        std::env::current_dir().ok(),
    )
}

fn find_root(
    explicit: Option<&Path>,
    env_root: Option<PathBuf>,
    exe: Option<PathBuf>,
    cwd: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }
    if let Some(root) = env_root {
        return Ok(root);
    }

    if let Some(exe) = exe
        && let Some(parent) = exe.parent()
    {
        let candidates = [
            parent.join("../.."), // target/release/ → repo root
            parent.join(".."),    // bin/ → repo root
        ];
        for candidate in &candidates {
            if is_repo_root(candidate) {
                return Ok(dunce::canonicalize(candidate)?);
            }
        }
    }

    if let Some(cwd) = cwd
        && is_repo_root(&cwd)
    {
        return Ok(cwd);
    }

    bail!("cannot determine dotfiles root. Use --root or set DOTFILES_ROOT env var");
}

/// Resolve the home directory from `--home` or `$HOME`.
///
/// # Errors
///
/// Returns an error if neither is available.
pub fn resolve_home(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(home) = explicit {
        return Ok(home.to_path_buf());
    }
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("HOME environment variable is not set"))
}
