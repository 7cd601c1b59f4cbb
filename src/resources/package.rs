//! Package bundle resource.
use anyhow::{Context as _, Result};

use super::{Applicable, ResourceChange};
use crate::config::packages::PackageManifest;
use crate::error::InstallError;
use crate::exec::Executor;

/// Output fragments that mark a non-zero `brew bundle` exit as benign.
const ALREADY_INSTALLED_MARKERS: &[&str] = &["already satisfied", "is already installed"];

/// Installs everything declared in the package manifest.
///
/// The manifest is opaque: its state is not queried, the package manager is
/// simply asked to converge on it. Failures carry an [`InstallError`] that
/// callers can recover with `downcast_ref`.
#[derive(Debug)]
pub struct BundleResource<'a> {
    manifest: &'a PackageManifest,
    executor: &'a dyn Executor,
}

impl<'a> BundleResource<'a> {
    /// Create a new bundle resource.
    #[must_use]
    pub const fn new(manifest: &'a PackageManifest, executor: &'a dyn Executor) -> Self {
        Self { manifest, executor }
    }

    /// Verify the package manager and manifest are both present.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::PackageManagerUnavailable`] when the package
    /// manager is not on `PATH`, or [`InstallError::ManifestMissing`] when
    /// the manifest file does not exist.
    pub fn check_prerequisites(&self) -> Result<(), InstallError> {
        if !self.executor.which(&self.manifest.manager) {
            return Err(InstallError::PackageManagerUnavailable {
                program: self.manifest.manager.clone(),
            });
        }
        if !self.manifest.path.is_file() {
            return Err(InstallError::ManifestMissing {
                path: self.manifest.path.clone(),
            });
        }
        Ok(())
    }

    /// The command line that `apply()` runs.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.manifest.manager.clone();
        for arg in self.manifest.install_args() {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}

impl Applicable for BundleResource<'_> {
    fn description(&self) -> String {
        format!("packages from {}", self.manifest.path.display())
    }

    fn apply(&self) -> Result<ResourceChange> {
        self.check_prerequisites()?;

        let args = self.manifest.install_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let result = self
            .executor
            .run_unchecked(&self.manifest.manager, &args)
            .with_context(|| format!("running {}", self.command_line()))?;

        if result.success {
            return Ok(ResourceChange::Applied);
        }

        let already = ALREADY_INSTALLED_MARKERS
            .iter()
            .any(|m| result.stdout.contains(m) || result.stderr.contains(m));
        if already {
            return Ok(ResourceChange::AlreadyCorrect);
        }

        Err(InstallError::PackageInstallFailed {
            program: self.manifest.manager.clone(),
            exit_code: result.code.unwrap_or(-1),
            stderr: result.stderr.trim().to_string(),
        }
        .into())
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;

    fn manifest_in(dir: &std::path::Path) -> PackageManifest {
        let manifest = PackageManifest::in_repo(dir);
        std::fs::create_dir_all(manifest.path.parent().unwrap()).unwrap();
        std::fs::write(&manifest.path, "brew \"fish\"\n").unwrap();
        manifest
    }

    #[test]
    fn command_line_uses_bundle_install() {
        let manifest = PackageManifest::in_repo(std::path::Path::new("/repo"));
        let executor = MockExecutor::new();
        let resource = BundleResource::new(&manifest, &executor);
        assert_eq!(
            resource.command_line(),
            "brew bundle install --file /repo/brewfile/Brewfile"
        );
    }

    #[test]
    fn unavailable_manager_reported() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = manifest_in(dir.path());
        let executor = MockExecutor::new();
        let resource = BundleResource::new(&manifest, &executor);

        let err = resource.apply().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InstallError>(),
            Some(InstallError::PackageManagerUnavailable { program }) if program == "brew"
        ));
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn missing_manifest_reported() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = PackageManifest::in_repo(dir.path());
        let executor = MockExecutor::new().with_program("brew");
        let resource = BundleResource::new(&manifest, &executor);

        assert!(matches!(
            resource.check_prerequisites(),
            Err(InstallError::ManifestMissing { .. })
        ));
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn successful_bundle_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = manifest_in(dir.path());
        let executor = MockExecutor::ok("Homebrew Bundle complete!").with_program("brew");
        let resource = BundleResource::new(&manifest, &executor);

        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("brew bundle install --file "));
        assert!(calls[0].ends_with("brewfile/Brewfile"));
    }

    #[test]
    fn already_installed_failure_is_benign() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = manifest_in(dir.path());
        let executor =
            MockExecutor::fail("Warning: fish 3.7.1 is already installed").with_program("brew");
        let resource = BundleResource::new(&manifest, &executor);

        assert_eq!(resource.apply().unwrap(), ResourceChange::AlreadyCorrect);
    }

    #[test]
    fn other_failure_carries_exit_code_and_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = manifest_in(dir.path());
        let executor = MockExecutor::fail("Error: No available formula").with_program("brew");
        let resource = BundleResource::new(&manifest, &executor);

        let err = resource.apply().unwrap_err();
        match err.downcast_ref::<InstallError>() {
            Some(InstallError::PackageInstallFailed {
                program,
                exit_code,
                stderr,
            }) => {
                assert_eq!(program, "brew");
                assert_eq!(*exit_code, 1);
                assert_eq!(stderr, "Error: No available formula");
            }
            other => panic!("expected PackageInstallFailed, got {other:?}"),
        }
    }
}
