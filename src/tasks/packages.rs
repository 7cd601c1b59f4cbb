//! Package bundle task.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::error::InstallError;
use crate::resources::package::BundleResource;
use crate::resources::{Applicable as _, ResourceChange};

/// Install the packages declared in the bundled manifest.
///
/// Every failure here is a warning: it is reported, the task is marked
/// skipped, and the links already created are left in place.
#[derive(Debug)]
pub struct InstallPackages;

impl Task for InstallPackages {
    fn name(&self) -> &'static str {
        "Install packages"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.options.skip_packages
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let resource = BundleResource::new(&ctx.config.manifest, &*ctx.executor);

        if let Err(problem) = resource.check_prerequisites() {
            return Ok(skip_with(ctx, problem));
        }

        if ctx.dry_run() {
            ctx.log
                .dry_run(&format!("would run: {}", resource.command_line()));
            return Ok(TaskResult::DryRun);
        }

        ctx.log.debug(&format!("running: {}", resource.command_line()));
        match resource.apply() {
            Ok(ResourceChange::Applied) => {
                ctx.log.info("packages installed");
                Ok(TaskResult::Ok)
            }
            Ok(ResourceChange::AlreadyCorrect) => {
                ctx.log.info("packages already installed");
                Ok(TaskResult::Ok)
            }
            Ok(ResourceChange::Skipped { reason }) => Ok(TaskResult::Skipped(reason)),
            Err(e) => {
                let problem = e.downcast::<InstallError>().unwrap_or_else(|e| {
                    InstallError::PackageInstallFailed {
                        program: ctx.config.manifest.manager.clone(),
                        exit_code: -1,
                        stderr: format!("{e:#}"),
                    }
                });
                Ok(skip_with(ctx, problem))
            }
        }
    }
}

fn skip_with(ctx: &Context, problem: InstallError) -> TaskResult {
    let reason = problem.to_string();
    ctx.report(problem);
    TaskResult::Skipped(reason)
}
