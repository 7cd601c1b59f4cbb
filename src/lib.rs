//! Dotfiles installer.
//!
//! Links the shell, editor, prompt, multiplexer and terminal configuration in
//! this repository into the home directory, then optionally installs the
//! packages declared in the bundled Brewfile.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: the fixed link table, manifest location and path resolution
//! - **[`resources`]**: idempotent `check + apply` primitives (symlink, bundle, login shell)
//! - **[`tasks`]**: named units of work wired to resources
//! - **[`commands`]**: top-level subcommand orchestration (`install`, `uninstall`, `verify`)
//!
//! Problems are classified by [`error::InstallError`]; only a config root that
//! cannot be created stops a run early.
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod resources;
pub mod tasks;
