//! Uninstall command implementation.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::tasks::{self, RunOptions};

/// Run the uninstall command.
///
/// # Errors
///
/// Returns an error if the root or home cannot be resolved or a link cannot
/// be removed.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let options = RunOptions {
        dry_run: global.dry_run,
        ..RunOptions::default()
    };
    let ctx = super::build_context(global, options, log)?;
    let tasks = tasks::all_uninstall_tasks();
    super::run_tasks_to_completion(tasks.iter().map(Box::as_ref), &ctx, log)
}
