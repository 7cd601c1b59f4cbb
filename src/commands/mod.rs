//! Top-level subcommand orchestration.
pub mod install;
pub mod uninstall;
pub mod verify;
pub mod version;

use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{self, Config};
use crate::exec::SystemExecutor;
use crate::logging::{Log, Logger};
use crate::tasks::{self, Context, RunOptions, Task};

/// Resolve the repository and home directories and build the task context.
///
/// # Errors
///
/// Returns an error if the root or home directory cannot be determined.
pub fn build_context(
    global: &GlobalOpts,
    options: RunOptions,
    log: &Arc<Logger>,
) -> Result<Context> {
    let root = config::resolve_root(global.root.as_deref())?;
    let home = config::resolve_home(global.home.as_deref())?;
    let config = Config::new(&root, &home);

    log.info(&format!("dotfiles {}", version::VERSION));
    log.debug(&format!("root: {}", config.root.display()));
    log.debug(&format!("home: {}", config.home.display()));
    log.debug(&format!("{} links", config.links.len()));

    Ok(Context::new(
        Arc::new(config),
        Arc::clone(log) as Arc<dyn Log>,
        Arc::new(SystemExecutor),
        options,
    ))
}

/// Execute every task in order, print the summary, and bail if any task failed.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    for task in tasks {
        tasks::execute(task, ctx);
    }

    log.print_summary(&[]);

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}
