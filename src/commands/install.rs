//! Install command implementation.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::{GlobalOpts, InstallOpts};
use crate::error::InstallError;
use crate::logging::Logger;
use crate::tasks::{self, Context};

/// Outcome of an install run that got past the config root.
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Every non-fatal problem, in the order it was reported.
    pub problems: Vec<InstallError>,
}

impl InstallReport {
    /// Whether the run should exit zero (warnings only).
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.problems.iter().any(InstallError::fails_run)
    }

    /// Problems that make the run fail.
    pub fn failures(&self) -> impl Iterator<Item = &InstallError> {
        self.problems.iter().filter(|p| p.fails_run())
    }

    /// Problems that are reported but do not affect the exit code.
    pub fn warnings(&self) -> impl Iterator<Item = &InstallError> {
        self.problems.iter().filter(|p| !p.fails_run())
    }
}

/// Ensure the config root, link every table entry, then run the optional
/// package and shell steps.
///
/// # Errors
///
/// Returns [`InstallError::DestinationRootUnwritable`] if the config root
/// cannot be created; no link is attempted in that case. Every other problem
/// is collected in the returned report.
pub fn install(ctx: &Context) -> Result<InstallReport, InstallError> {
    ensure_config_root(ctx)?;

    for task in tasks::all_install_tasks() {
        tasks::execute(task.as_ref(), ctx);
    }

    Ok(InstallReport {
        problems: ctx.take_problems(),
    })
}

fn ensure_config_root(ctx: &Context) -> Result<(), InstallError> {
    let path = ctx.config.config_root();
    if path.is_dir() {
        return Ok(());
    }
    if ctx.dry_run() {
        ctx.log
            .dry_run(&format!("would create {}", path.display()));
        return Ok(());
    }
    std::fs::create_dir_all(&path)
        .map_err(|source| InstallError::DestinationRootUnwritable { path, source })
}

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the config root cannot be created or any link failed.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Arc<Logger>) -> Result<()> {
    let ctx = super::build_context(global, opts.run_options(global), log)?;

    let report = install(&ctx)?;

    log.print_summary(&report.problems);

    let failures = report.failures().count();
    if failures > 0 {
        anyhow::bail!("{failures} link(s) could not be installed");
    }
    Ok(())
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;
    use crate::tasks::RunOptions;
    use crate::tasks::test_helpers::{fixture_repo, make_context, make_context_with};

    #[test]
    fn install_creates_config_root_and_links() {
        let repo = fixture_repo();
        let home = tempfile::tempdir().unwrap();
        let (ctx, _log) = make_context(repo.path(), home.path());

        let report = install(&ctx).unwrap();

        assert!(home.path().join(".config").is_dir());
        assert!(report.is_success());
        assert_eq!(report.failures().count(), 0);
        // brew is not on the mock PATH
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn fatal_root_error_stops_before_links() {
        let repo = fixture_repo();
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        std::fs::write(&home, "not a directory").unwrap();
        let (ctx, log) = make_context(repo.path(), &home);

        let err = install(&ctx).unwrap_err();

        assert!(matches!(err, InstallError::DestinationRootUnwritable { .. }));
        assert!(log.task_entries().is_empty(), "no task may run");
    }

    #[test]
    fn dry_run_creates_nothing() {
        let repo = fixture_repo();
        let home = tempfile::tempdir().unwrap();
        let options = RunOptions {
            dry_run: true,
            skip_packages: true,
            ..RunOptions::default()
        };
        let (ctx, _log) = make_context_with(
            repo.path(),
            home.path(),
            Arc::new(MockExecutor::new()),
            options,
        );

        let report = install(&ctx).unwrap();

        assert!(report.is_success());
        assert!(!home.path().join(".config").exists());
    }

    #[test]
    fn report_success_ignores_warnings() {
        let report = InstallReport {
            problems: vec![InstallError::ShellChangeFailed {
                reason: "fish is not installed".to_string(),
            }],
        };
        assert!(report.is_success());

        let report = InstallReport {
            problems: vec![InstallError::MissingSource {
                path: "/repo/fish".into(),
            }],
        };
        assert!(!report.is_success());
    }
}
