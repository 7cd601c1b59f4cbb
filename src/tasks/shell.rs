//! Opt-in task that makes fish the login shell.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::error::InstallError;
use crate::resources::shell::DefaultShellResource;
use crate::resources::{Applicable as _, Resource as _, ResourceState};

/// Login shell the repository's configuration is written for.
pub const LOGIN_SHELL: &str = "fish";

/// Configure the default shell to fish.
#[derive(Debug)]
pub struct ConfigureShell;

impl ConfigureShell {
    fn configure(ctx: &Context, resource: &DefaultShellResource<'_>) -> Result<TaskResult> {
        if resource.current_state()? == ResourceState::Correct {
            ctx.log.info(&format!("{LOGIN_SHELL} is already the login shell"));
            return Ok(TaskResult::Ok);
        }

        if ctx.dry_run() {
            ctx.log
                .dry_run(&format!("would set login shell to {LOGIN_SHELL}"));
            return Ok(TaskResult::DryRun);
        }

        match resource.apply() {
            Ok(_) => {
                ctx.log.info(&format!(
                    "login shell set to {LOGIN_SHELL} (takes effect on next login)"
                ));
                Ok(TaskResult::Ok)
            }
            Err(e) => {
                let problem = InstallError::ShellChangeFailed {
                    reason: format!("{e:#}"),
                };
                let reason = problem.to_string();
                ctx.report(problem);
                Ok(TaskResult::Skipped(reason))
            }
        }
    }
}

impl Task for ConfigureShell {
    fn name(&self) -> &'static str {
        "Configure default shell"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.options.set_shell
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let resource = DefaultShellResource::new(LOGIN_SHELL, &*ctx.executor);
        Self::configure(ctx, &resource)
    }
}
