//! Console and file logging for a run, plus the end-of-run summary.
//!
//! Every message is a [`tracing`] event. [`init_subscriber`] renders events
//! on the console and copies them, timestamped and without colour, to the run
//! log. [`Logger`] is the handle tasks log through; it also keeps each task's
//! outcome and prints the summary followed by the collected problems.
mod console;
mod file;
mod logger;
mod outcome;

use std::path::Path;

pub use file::log_file_path;
pub use logger::Logger;
pub use outcome::{TaskEntry, TaskStatus};

use crate::error::{InstallError, Severity};

/// Event target for stage headers.
const STAGE_TARGET: &str = "dotfiles::stage";
/// Event target for dry-run previews.
const DRY_RUN_TARGET: &str = "dotfiles::dry_run";

/// Where tasks send their output.
///
/// Task code logs through this trait so tests can substitute their own
/// logger without a global subscriber.
pub trait Log: Send + Sync {
    /// Log a stage header.
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (console only with `--verbose`).
    fn debug(&self, msg: &str);
    /// Log a warning.
    fn warn(&self, msg: &str);
    /// Log an error.
    fn error(&self, msg: &str);
    /// Log what a dry run would have done.
    fn dry_run(&self, msg: &str);
    /// Record how a task ended, for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);

    /// Log an installer problem as a warning or an error, by severity.
    fn problem(&self, problem: &InstallError) {
        match problem.severity() {
            Severity::Warning => self.warn(&problem.to_string()),
            Severity::Error | Severity::Fatal => self.error(&problem.to_string()),
        }
    }
}

/// The kinds of line an event renders as, on the console and in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Stage,
    DryRun,
    Info,
    Debug,
    Warn,
    Error,
}

impl LineKind {
    fn of(metadata: &tracing::Metadata<'_>) -> Self {
        match (*metadata.level(), metadata.target()) {
            (tracing::Level::ERROR, _) => Self::Error,
            (tracing::Level::WARN, _) => Self::Warn,
            (tracing::Level::INFO, STAGE_TARGET) => Self::Stage,
            (tracing::Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (tracing::Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }
}

/// Pull the formatted `message` field out of an event.
fn event_message(event: &tracing::Event<'_>) -> String {
    struct Message(String);

    impl tracing::field::Visit for Message {
        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            if field.name() == "message" {
                value.clone_into(&mut self.0);
            }
        }

        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    let mut message = Message(String::new());
    event.record(&mut message);
    message.0
}

/// Install the global subscriber: the console layer, plus a file layer
/// writing every `DEBUG`-and-above event to `log_file`.
///
/// Returns whether the log file could be opened. Must be called once, before
/// any logging.
pub fn init_subscriber(verbose: bool, log_file: &Path) -> bool {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{Layer as _, layer::SubscriberExt as _, util::SubscriberInitExt as _};

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));
    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(console::ConsoleFormat)
        .with_writer(console_writer)
        .with_filter(console_level);

    let file_layer = file::FileLayer::create(log_file);
    let has_file = file_layer.is_some();

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer.map(|l| l.with_filter(LevelFilter::DEBUG)))
        .init();
    has_file
}

/// A [`Logger`] wired to a thread-local subscriber that writes into a
/// temporary log file, so tests can read back what was logged.
#[cfg(test)]
pub(crate) struct TestLog {
    pub logger: Logger,
    pub path: std::path::PathBuf,
    _dir: tempfile::TempDir,
    _guard: tracing::dispatcher::DefaultGuard,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl TestLog {
    pub(crate) fn new() -> Self {
        use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};

        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("install.log");
        let layer = file::FileLayer::create(&path).expect("open test log");
        let subscriber = tracing_subscriber::registry().with(layer.with_filter(LevelFilter::DEBUG));
        let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
        Self {
            logger: Logger::new(Some(path.clone())),
            path,
            _dir: dir,
            _guard: guard,
        }
    }

    pub(crate) fn contents(&self) -> String {
        std::fs::read_to_string(&self.path).expect("read test log")
    }
}
