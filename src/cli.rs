//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::tasks::RunOptions;

/// Top-level CLI entry point for the dotfiles installer.
#[derive(Parser, Debug)]
#[command(
    name = "dotfiles",
    about = "Link dotfiles into place and install the bundled packages",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override dotfiles root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Override the home directory links are created in
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Link dotfiles and install packages
    Install(InstallOpts),
    /// Remove links that point into the repository
    Uninstall,
    /// Check links and expected tools without changing anything
    Verify,
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Install(_) => "install",
            Self::Uninstall => "uninstall",
            Self::Verify => "verify",
            Self::Version => "version",
        }
    }
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct InstallOpts {
    /// Do not run the package manager
    #[arg(long, env = "DOTFILES_SKIP_PACKAGES")]
    pub skip_packages: bool,

    /// Move existing files and directories to <name>.backup instead of deleting them
    #[arg(long)]
    pub backup: bool,

    /// Make fish the login shell
    #[arg(long)]
    pub set_shell: bool,
}

impl InstallOpts {
    /// Combine with the global options into run switches.
    #[must_use]
    pub const fn run_options(&self, global: &GlobalOpts) -> RunOptions {
        RunOptions {
            dry_run: global.dry_run,
            backup: self.backup,
            skip_packages: self.skip_packages,
            set_shell: self.set_shell,
        }
    }
}
