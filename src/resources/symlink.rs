//! Symlink resource.
use anyhow::{Context as _, Result, bail};
use std::path::{Path, PathBuf};

use super::helpers::fs::{backup_path, ensure_parent_dir, entry_exists, is_real_dir, remove_any};
use super::{Applicable, Resource, ResourceChange, ResourceState};

/// A symlink resource that can be checked, applied and removed.
///
/// Applying replaces whatever occupies the target (file, directory or other
/// link). With `backup` set, a target that is not a symlink is first moved to
/// `<target>.backup`, unless that backup already exists.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The source file/directory (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink will be created).
    pub target: PathBuf,
    /// Move non-symlink targets aside instead of deleting them.
    pub backup: bool,
}

impl SymlinkResource {
    /// Create a new symlink resource that overwrites its target.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self {
            source,
            target,
            backup: false,
        }
    }

    /// Enable or disable backup-before-overwrite.
    #[must_use]
    pub const fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Where the current target will be moved by `apply()`, if anywhere.
    #[must_use]
    pub fn backup_destination(&self) -> Option<PathBuf> {
        if !self.backup {
            return None;
        }
        let is_link = self.target.symlink_metadata().is_ok_and(|m| m.is_symlink());
        if is_link || !entry_exists(&self.target) {
            return None;
        }
        let backup = backup_path(&self.target);
        (!entry_exists(&backup)).then_some(backup)
    }

    /// Whether the target is a symlink pointing at the source.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        std::fs::read_link(&self.target).is_ok_and(|existing| paths_equal(&existing, &self.source))
    }

    /// Whether the target path is the source itself or one of its ancestors.
    ///
    /// True when the repository is checked out under the home directory at a
    /// destination path, e.g. cloned to `~/.config`. Only the target's parent
    /// is resolved, so a target that is itself a link never matches.
    #[must_use]
    pub fn target_holds_source(&self) -> bool {
        let (Some(parent), Some(name)) = (self.target.parent(), self.target.file_name()) else {
            return false;
        };
        let (Ok(parent), Ok(source)) = (
            dunce::canonicalize(parent),
            dunce::canonicalize(&self.source),
        ) else {
            return false;
        };
        source.starts_with(parent.join(name))
    }
}

impl Applicable for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        if !self.source.exists() {
            bail!("source does not exist: {}", self.source.display());
        }
        if self.target_holds_source() {
            bail!(
                "{} is the repository source itself, refusing to replace it",
                self.target.display()
            );
        }
        if self.is_linked() {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        ensure_parent_dir(&self.target)?;

        if let Some(backup) = self.backup_destination() {
            std::fs::rename(&self.target, &backup).with_context(|| {
                format!(
                    "back up {} to {}",
                    self.target.display(),
                    backup.display()
                )
            })?;
        } else {
            remove_any(&self.target)
                .with_context(|| format!("remove existing: {}", self.target.display()))?;
        }

        create_symlink(&self.source, &self.target)
            .with_context(|| format!("create link: {}", self.target.display()))?;

        Ok(ResourceChange::Applied)
    }

    fn remove(&self) -> Result<ResourceChange> {
        if !self.is_linked() {
            return Ok(ResourceChange::Skipped {
                reason: format!("{} is not linked to the repository", self.target.display()),
            });
        }
        remove_any(&self.target)?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for SymlinkResource {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }
        if self.target_holds_source() {
            return Ok(ResourceState::Invalid {
                reason: format!("{} is the repository source itself", self.target.display()),
            });
        }

        match std::fs::read_link(&self.target) {
            Ok(existing) if paths_equal(&existing, &self.source) => Ok(ResourceState::Correct),
            Ok(existing) => Ok(ResourceState::Incorrect {
                current: format!("points to {}", existing.display()),
            }),
            Err(_) if is_real_dir(&self.target) => Ok(ResourceState::Incorrect {
                current: "target is a directory".to_string(),
            }),
            Err(_) if entry_exists(&self.target) => Ok(ResourceState::Incorrect {
                current: "target is a regular file".to_string(),
            }),
            Err(_) => Ok(ResourceState::Missing),
        }
    }
}

/// Compare two paths for equality, handling UNC prefix normalization on Windows.
fn paths_equal(a: &Path, b: &Path) -> bool {
    let normalize = |p: &Path| -> PathBuf {
        #[cfg(windows)]
        {
            let s = p.to_string_lossy();
            if let Some(stripped) = s.strip_prefix(r"\\?\") {
                return PathBuf::from(stripped);
            }
        }
        p.to_path_buf()
    };

    normalize(a) == normalize(b)
}

/// Create a symlink at `link` pointing to `target`.
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    std::os::unix::fs::symlink(target, link).with_context(|| {
        format!(
            "creating symlink {} -> {}",
            link.display(),
            target.display()
        )
    })?;

    #[cfg(windows)]
    {
        let result = if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        };
        result.with_context(|| {
            format!(
                "creating symlink {} -> {} (requires developer mode)",
                link.display(),
                target.display()
            )
        })?;
    }

    Ok(())
}
