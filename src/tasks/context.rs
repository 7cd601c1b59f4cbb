//! Shared state handed to every task.
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::error::InstallError;
use crate::exec::Executor;
use crate::logging::Log;

/// Switches that change what a run does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunOptions {
    /// Preview changes without applying them.
    pub dry_run: bool,
    /// Move non-symlink destinations to `<dest>.backup` before linking.
    pub backup: bool,
    /// Do not run the package manager.
    pub skip_packages: bool,
    /// Make fish the login shell.
    pub set_shell: bool,
}

/// Shared context for task execution.
pub struct Context {
    /// Resolved configuration for this run.
    pub config: Arc<Config>,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// Run switches.
    pub options: RunOptions,
    problems: Mutex<Vec<InstallError>>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("log", &"<dyn Log>")
            .field("executor", &self.executor)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Creates a new context for task execution.
    #[must_use]
    pub fn new(
        config: Arc<Config>,
        log: Arc<dyn Log>,
        executor: Arc<dyn Executor>,
        options: RunOptions,
    ) -> Self {
        Self {
            config,
            log,
            executor,
            options,
            problems: Mutex::new(Vec::new()),
        }
    }

    /// Whether changes should only be reported.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.options.dry_run
    }

    /// Log `problem` at its severity and keep it for the end-of-run report.
    pub fn report(&self, problem: InstallError) {
        self.log.problem(&problem);
        self.problems
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(problem);
    }

    /// Drain every problem reported so far, in reporting order.
    pub fn take_problems(&self) -> Vec<InstallError> {
        std::mem::take(
            &mut *self
                .problems
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner),
        )
    }
}
