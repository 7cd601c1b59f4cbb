// Shared helpers for integration tests.
//
// Provides a temporary repository laid out like the dotfiles checkout, an
// empty home directory, and an executor that finds no programs so package and
// shell steps never touch the host.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};
use dotfiles_installer::config::Config;
use dotfiles_installer::exec::{ExecResult, Executor};
use dotfiles_installer::logging::{Log, Logger};
use dotfiles_installer::tasks::{Context, RunOptions};

/// Repository sources created by [`setup_repo`], paired with a file inside
/// each directory source.
pub const SOURCES: &[(&str, Option<&str>)] = &[
    ("ghostty", Some("config")),
    ("tmux/tmux.conf", None),
    ("fish", Some("config.fish")),
    ("starship", Some("starship.toml")),
    ("nvim", Some("init.lua")),
];

/// Create every link source plus `brewfile/Brewfile` under `root`.
pub fn setup_repo(root: &Path) {
    for (source, inner) in SOURCES {
        let path = root.join(source);
        if let Some(inner) = inner {
            std::fs::create_dir_all(&path).expect("create source dir");
            std::fs::write(path.join(inner), "# test\n").expect("write source file");
        } else {
            std::fs::create_dir_all(path.parent().expect("source parent"))
                .expect("create source parent");
            std::fs::write(&path, "# test\n").expect("write source file");
        }
    }
    std::fs::create_dir_all(root.join("brewfile")).expect("create brewfile dir");
    std::fs::write(root.join("brewfile/Brewfile"), "brew \"git\"\n").expect("write Brewfile");
}

/// Executor that finds no programs and refuses to run anything.
#[derive(Debug, Default)]
pub struct NoProgramsExecutor;

impl Executor for NoProgramsExecutor {
    fn run(&self, program: &str, _args: &[&str]) -> Result<ExecResult> {
        bail!("{program} is not available in tests")
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.run(program, args)
    }

    fn locate(&self, _program: &str) -> Option<PathBuf> {
        None
    }
}

/// A repository and home directory that live as long as the context.
pub struct IntegrationTestContext {
    /// Temporary directory containing the test dotfiles repository.
    pub repo: tempfile::TempDir,
    /// Temporary directory standing in for `$HOME`.
    pub home: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a fully populated repository and an empty home.
    pub fn new() -> Self {
        let repo = tempfile::tempdir().expect("create repo tempdir");
        let home = tempfile::tempdir().expect("create home tempdir");
        setup_repo(repo.path());
        Self { repo, home }
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        self.repo.path()
    }

    /// Home directory.
    pub fn home(&self) -> &Path {
        self.home.path()
    }

    /// Remove a link source from the repository.
    pub fn remove_source(&self, source: &str) {
        let path = self.root().join(source);
        if path.is_dir() {
            std::fs::remove_dir_all(&path).expect("remove source dir");
        } else {
            std::fs::remove_file(&path).expect("remove source file");
        }
    }

    /// Build a task context with packages skipped and no log file.
    pub fn context(&self, options: RunOptions) -> (Context, Arc<Logger>) {
        self.context_for_home(self.home(), options)
    }

    /// Like [`Self::context`] but links into `home` instead.
    pub fn context_for_home(&self, home: &Path, options: RunOptions) -> (Context, Arc<Logger>) {
        context_with_config(Config::new(self.root(), home), options)
    }
}

/// Build a task context around an already assembled [`Config`].
pub fn context_with_config(config: Config, options: RunOptions) -> (Context, Arc<Logger>) {
    let log = Arc::new(Logger::new(None));
    let ctx = Context::new(
        Arc::new(config),
        Arc::clone(&log) as Arc<dyn Log>,
        Arc::new(NoProgramsExecutor),
        options,
    );
    (ctx, log)
}

/// Options for an install that skips the package step.
pub fn links_only() -> RunOptions {
    RunOptions {
        skip_packages: true,
        ..RunOptions::default()
    }
}
