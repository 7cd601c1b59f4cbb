//! How each task of a run ended.
use std::fmt;

/// Final state of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// The task ran and everything is in place.
    Done,
    /// The run did not ask for this task (`--skip-packages`, no `--set-shell`).
    NotRequested,
    /// The task gave up on something it could not do; see the problems.
    Skipped,
    /// Dry run: changes were only reported.
    Previewed,
    /// The task failed; the run exits non-zero.
    Failed,
}

impl TaskStatus {
    const fn marker(self) -> (&'static str, &'static str) {
        match self {
            Self::Done => ("✓", "\x1b[32m"),
            Self::NotRequested => ("·", "\x1b[2m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::Previewed => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}

/// One summary line.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Task name as shown in its stage header.
    pub name: String,
    /// How it ended.
    pub status: TaskStatus,
    /// Skip reason or error chain, if any.
    pub message: Option<String>,
}

impl fmt::Display for TaskEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (icon, colour) = self.status.marker();
        write!(f, "{colour}{icon} {}", self.name)?;
        if let Some(message) = &self.message {
            write!(f, " ({message})")?;
        }
        f.write_str("\x1b[0m")
    }
}

/// Per-status counts for the summary footer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct Tally {
    done: usize,
    not_requested: usize,
    skipped: usize,
    previewed: usize,
    failed: usize,
}

impl Tally {
    pub(super) fn of(entries: &[TaskEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut tally, entry| {
            match entry.status {
                TaskStatus::Done => tally.done += 1,
                TaskStatus::NotRequested => tally.not_requested += 1,
                TaskStatus::Skipped => tally.skipped += 1,
                TaskStatus::Previewed => tally.previewed += 1,
                TaskStatus::Failed => tally.failed += 1,
            }
            tally
        })
    }

    const fn total(&self) -> usize {
        self.done + self.not_requested + self.skipped + self.previewed + self.failed
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tasks: \x1b[32m{} done\x1b[0m, \x1b[2m{} not requested\x1b[0m, \
             \x1b[33m{} skipped\x1b[0m, \x1b[37m{} previewed\x1b[0m, \x1b[31m{} failed\x1b[0m",
            self.total(),
            self.done,
            self.not_requested,
            self.skipped,
            self.previewed,
            self.failed,
        )
    }
}
