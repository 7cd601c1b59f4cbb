//! Domain-specific error types for the installer.
//!
//! Internal modules return [`anyhow::Error`] with context; the problems a run
//! can run into are classified as [`InstallError`] so they can be collected
//! and reported together once every link has been attempted.
//!
//! # Severity
//!
//! ```text
//! InstallError
//! ├── DestinationRootUnwritable  : fatal, aborts before any link
//! ├── MissingSource              : error, fails the run
//! ├── LinkCreationFailed         : error, fails the run
//! ├── PackageManagerUnavailable  : warning
//! ├── ManifestMissing            : warning
//! ├── PackageInstallFailed       : warning
//! └── ShellChangeFailed          : warning
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// How a problem affects the outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Reported, but the run still succeeds.
    Warning,
    /// The run continues but exits non-zero.
    Error,
    /// The run stops immediately.
    Fatal,
}

/// A problem encountered while installing.
#[derive(Error, Debug)]
pub enum InstallError {
    /// A link table entry's source does not exist in the repository.
    #[error("source not found: {}", path.display())]
    MissingSource {
        /// Absolute path of the missing source.
        path: PathBuf,
    },

    /// The config root could not be created.
    #[error("cannot create config root {}: {source}", path.display())]
    DestinationRootUnwritable {
        /// Config root that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Creating (or replacing) an individual link failed.
    #[error("failed to link {}: {reason}", destination.display())]
    LinkCreationFailed {
        /// Destination path of the link.
        destination: PathBuf,
        /// Human-readable cause, including the error chain.
        reason: String,
    },

    /// The package manager binary is not on `PATH`.
    #[error("package manager '{program}' not found on PATH")]
    PackageManagerUnavailable {
        /// Name of the package manager binary.
        program: String,
    },

    /// The package manifest is absent from the repository.
    #[error("package manifest not found: {}", path.display())]
    ManifestMissing {
        /// Expected manifest path.
        path: PathBuf,
    },

    /// The package manager ran but reported a failure.
    #[error("'{program}' failed (exit {exit_code}): {stderr}")]
    PackageInstallFailed {
        /// Package manager binary that was invoked.
        program: String,
        /// Exit code, `-1` if the process was killed by a signal.
        exit_code: i32,
        /// Captured standard error.
        stderr: String,
    },

    /// The login shell could not be changed.
    #[error("cannot change login shell: {reason}")]
    ShellChangeFailed {
        /// Human-readable cause.
        reason: String,
    },
}

impl InstallError {
    /// Classify this problem.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::DestinationRootUnwritable { .. } => Severity::Fatal,
            Self::MissingSource { .. } | Self::LinkCreationFailed { .. } => Severity::Error,
            Self::PackageManagerUnavailable { .. }
            | Self::ManifestMissing { .. }
            | Self::PackageInstallFailed { .. }
            | Self::ShellChangeFailed { .. } => Severity::Warning,
        }
    }

    /// Whether this problem makes the run exit non-zero.
    #[must_use]
    pub fn fails_run(&self) -> bool {
        self.severity() >= Severity::Error
    }
}
