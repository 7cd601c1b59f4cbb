//! Tasks that link the repository into the home directory and remove those links again.
use anyhow::{Result, bail};

use super::{Context, Task, TaskResult};
use crate::error::InstallError;
use crate::resources::symlink::SymlinkResource;
use crate::resources::{Applicable as _, Resource as _, ResourceChange, ResourceState};

/// Link every table entry from the repository into the home directory.
///
/// A missing source or a failed link is reported and the loop moves on to
/// the next entry; the task fails at the end if anything did.
#[derive(Debug)]
pub struct InstallSymlinks;

impl Task for InstallSymlinks {
    fn name(&self) -> &'static str {
        "Install symlinks"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.links.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let mut changed = 0u32;
        let mut already_ok = 0u32;
        let mut failed = 0u32;

        for (source, target) in ctx.config.link_paths() {
            let resource = SymlinkResource::new(source.clone(), target.clone())
                .with_backup(ctx.options.backup);

            match resource.current_state() {
                Ok(ResourceState::Invalid { .. }) if !source.exists() => {
                    ctx.report(InstallError::MissingSource { path: source });
                    failed += 1;
                    continue;
                }
                Ok(ResourceState::Invalid { reason }) => {
                    ctx.report(InstallError::LinkCreationFailed {
                        destination: target,
                        reason,
                    });
                    failed += 1;
                    continue;
                }
                Ok(ResourceState::Correct) => {
                    ctx.log
                        .debug(&format!("ok: {} (already linked)", target.display()));
                    already_ok += 1;
                    continue;
                }
                Ok(ResourceState::Incorrect { current }) => {
                    ctx.log
                        .debug(&format!("replacing {}: {current}", target.display()));
                }
                Ok(ResourceState::Missing) => {}
                Err(e) => {
                    ctx.report(InstallError::LinkCreationFailed {
                        destination: target,
                        reason: format!("{e:#}"),
                    });
                    failed += 1;
                    continue;
                }
            }

            let backup = resource.backup_destination();

            if ctx.dry_run() {
                if let Some(backup) = &backup {
                    ctx.log.dry_run(&format!(
                        "would back up {} to {}",
                        target.display(),
                        backup.display()
                    ));
                }
                ctx.log.dry_run(&format!(
                    "would link {} -> {}",
                    target.display(),
                    source.display()
                ));
                changed += 1;
                continue;
            }

            match resource.apply() {
                Ok(ResourceChange::AlreadyCorrect) => already_ok += 1,
                Ok(_) => {
                    if let Some(backup) = &backup {
                        ctx.log.warn(&format!(
                            "backed up existing {} to {}",
                            target.display(),
                            backup.display()
                        ));
                    }
                    ctx.log.debug(&format!(
                        "linked {} -> {}",
                        target.display(),
                        source.display()
                    ));
                    changed += 1;
                }
                Err(e) => {
                    ctx.report(InstallError::LinkCreationFailed {
                        destination: target,
                        reason: format!("{e:#}"),
                    });
                    failed += 1;
                }
            }
        }

        let verb = if ctx.dry_run() { "would change" } else { "changed" };
        ctx.log.info(&format!(
            "{changed} {verb}, {already_ok} already ok, {failed} failed"
        ));

        if failed > 0 {
            bail!("{failed} of {} links failed", ctx.config.links.len());
        }
        if ctx.dry_run() {
            return Ok(TaskResult::DryRun);
        }
        Ok(TaskResult::Ok)
    }
}

/// Remove links that point into the repository.
#[derive(Debug)]
pub struct UninstallSymlinks;

impl Task for UninstallSymlinks {
    fn name(&self) -> &'static str {
        "Remove symlinks"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.links.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let mut removed = 0u32;
        let mut untouched = 0u32;
        let mut failed = 0u32;

        for (source, target) in ctx.config.link_paths() {
            let resource = SymlinkResource::new(source, target.clone());

            if ctx.dry_run() {
                if resource.is_linked() {
                    ctx.log
                        .dry_run(&format!("would remove {}", target.display()));
                    removed += 1;
                } else {
                    untouched += 1;
                }
                continue;
            }

            match resource.remove() {
                Ok(ResourceChange::Applied) => {
                    ctx.log.debug(&format!("removed {}", target.display()));
                    removed += 1;
                }
                Ok(ResourceChange::Skipped { reason }) => {
                    ctx.log.debug(&format!("left alone: {reason}"));
                    untouched += 1;
                }
                Ok(ResourceChange::AlreadyCorrect) => untouched += 1,
                Err(e) => {
                    ctx.log
                        .error(&format!("cannot remove {}: {e:#}", target.display()));
                    failed += 1;
                }
            }
        }

        if ctx.dry_run() {
            ctx.log.info(&format!(
                "{removed} would be removed, {untouched} left alone"
            ));
            return Ok(TaskResult::DryRun);
        }

        ctx.log.info(&format!(
            "{removed} removed, {untouched} left alone, {failed} failed"
        ));
        if failed > 0 {
            bail!(
                "{failed} of {} links could not be removed",
                ctx.config.links.len()
            );
        }
        Ok(TaskResult::Ok)
    }
}
