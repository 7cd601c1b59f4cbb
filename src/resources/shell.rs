//! Login shell resource.
//!
//! Changing the shell goes through `chsh`, which only accepts shells listed in
//! `/etc/shells`; that file is checked here and never edited.
use anyhow::{Context as _, Result, bail};
use std::path::{Path, PathBuf};

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::exec::Executor;

/// File listing the shells `chsh` accepts.
pub const SHELLS_FILE: &str = "/etc/shells";

/// A resource for configuring the default login shell.
#[derive(Debug)]
pub struct DefaultShellResource<'a> {
    /// Target shell name (e.g., "fish").
    target_shell: String,
    /// Login shell at startup, as reported by `$SHELL`.
    current_shell: String,
    /// Allow-list consulted before calling `chsh`.
    shells_file: PathBuf,
    /// Executor for running system commands.
    executor: &'a dyn Executor,
}

impl<'a> DefaultShellResource<'a> {
    /// Create a new default shell resource for the current user.
    #[must_use]
    pub fn new(target_shell: &str, executor: &'a dyn Executor) -> Self {
        Self {
            target_shell: target_shell.to_string(),
            current_shell: std::env::var("SHELL").unwrap_or_default(),
            shells_file: PathBuf::from(SHELLS_FILE),
            executor,
        }
    }

    /// Override the detected login shell.
    #[must_use]
    pub fn with_current_shell(mut self, shell: &str) -> Self {
        self.current_shell = shell.to_string();
        self
    }

    /// Override the shells allow-list location.
    #[must_use]
    pub fn with_shells_file(mut self, path: &Path) -> Self {
        self.shells_file = path.to_path_buf();
        self
    }

    fn is_allowed(&self, shell_path: &Path) -> Result<bool> {
        let content = std::fs::read_to_string(&self.shells_file)
            .with_context(|| format!("reading {}", self.shells_file.display()))?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .any(|l| Path::new(l) == shell_path))
    }
}

impl Applicable for DefaultShellResource<'_> {
    fn description(&self) -> String {
        format!("default shell → {}", self.target_shell)
    }

    fn apply(&self) -> Result<ResourceChange> {
        let Some(shell_path) = self.executor.locate(&self.target_shell) else {
            bail!("{} is not installed", self.target_shell);
        };
        if !self.is_allowed(&shell_path)? {
            bail!(
                "{} is not listed in {}",
                shell_path.display(),
                self.shells_file.display()
            );
        }
        let shell_path = shell_path.to_string_lossy();
        self.executor.run("chsh", &["-s", &shell_path])?;
        Ok(ResourceChange::Applied)
    }
}

impl Resource for DefaultShellResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let suffix = format!("/{}", self.target_shell);

        if self.current_shell.ends_with(&suffix) {
            Ok(ResourceState::Correct)
        } else if self.current_shell.is_empty() {
            Ok(ResourceState::Missing)
        } else {
            Ok(ResourceState::Incorrect {
                current: self.current_shell.clone(),
            })
        }
    }
}
