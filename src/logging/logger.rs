//! The run logger.
use std::cmp::Reverse;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use super::outcome::{Tally, TaskEntry, TaskStatus};
use super::{DRY_RUN_TARGET, Log, STAGE_TARGET};
use crate::error::InstallError;

/// Forwards messages to [`tracing`] and keeps task outcomes for the summary.
#[derive(Debug)]
pub struct Logger {
    entries: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// A logger whose summary points at `log_file`, if there is one.
    #[must_use]
    pub const fn new(log_file: Option<PathBuf>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Every task outcome recorded so far.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of tasks that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.status == TaskStatus::Failed)
            .count()
    }

    /// Print one line per task and the counts, then every problem worst
    /// first, then where the full log is.
    #[allow(clippy::print_stdout)]
    pub fn print_summary(&self, problems: &[InstallError]) {
        let entries = self.task_entries();
        if entries.is_empty() && problems.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");
        for entry in &entries {
            self.info(&entry.to_string());
        }
        self.info(&Tally::of(&entries).to_string());

        if !problems.is_empty() {
            println!();
            self.stage("Problems");
            let mut ordered: Vec<&InstallError> = problems.iter().collect();
            ordered.sort_by_key(|p| Reverse(p.severity()));
            for problem in ordered {
                self.problem(problem);
            }
            let failing = problems.iter().filter(|p| p.fails_run()).count();
            self.info(&format!(
                "{failing} failing, {} warning(s)",
                problems.len() - failing
            ));
        }

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TaskEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
    }
}
