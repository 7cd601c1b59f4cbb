//! Verify command: report link and tool state without changing anything.
use anyhow::Result;
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::resources::symlink::SymlinkResource;
use crate::resources::{Resource as _, ResourceState};
use crate::tasks::{Context, RunOptions, Task, TaskResult};

/// Programs the configuration expects on `PATH`.
pub const EXPECTED_TOOLS: &[&str] = &["brew", "fish", "git", "starship", "nvim", "tmux"];

/// Run the verify command.
///
/// # Errors
///
/// Returns an error if the root or home cannot be resolved or any link is
/// not in place.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let ctx = super::build_context(global, RunOptions::default(), log)?;
    let tasks = all_verify_tasks();
    super::run_tasks_to_completion(tasks.iter().map(Box::as_ref), &ctx, log)
}

/// Tasks run by the verify command.
#[must_use]
pub fn all_verify_tasks() -> Vec<Box<dyn Task>> {
    vec![Box::new(VerifySymlinks), Box::new(VerifyTools)]
}

/// Check that every link points at its repository source.
#[derive(Debug)]
pub struct VerifySymlinks;

impl Task for VerifySymlinks {
    fn name(&self) -> &'static str {
        "Verify symlinks"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.links.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let mut broken = 0u32;

        for (source, target) in ctx.config.link_paths() {
            let resource = SymlinkResource::new(source, target.clone());
            match resource.current_state()? {
                ResourceState::Correct => {
                    ctx.log.debug(&format!("ok: {}", target.display()));
                }
                ResourceState::Missing => {
                    ctx.log.error(&format!("missing: {}", target.display()));
                    broken += 1;
                }
                ResourceState::Incorrect { current } => {
                    ctx.log
                        .error(&format!("wrong: {} ({current})", target.display()));
                    broken += 1;
                }
                ResourceState::Invalid { reason } => {
                    ctx.log.error(&reason);
                    broken += 1;
                }
            }
        }

        if broken > 0 {
            anyhow::bail!("{broken} of {} links not in place", ctx.config.links.len());
        }

        ctx.log
            .info(&format!("all {} links in place", ctx.config.links.len()));
        Ok(TaskResult::Ok)
    }
}

/// Check that the expected tools are installed.
#[derive(Debug)]
pub struct VerifyTools;

impl Task for VerifyTools {
    fn name(&self) -> &'static str {
        "Verify tools"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let missing: Vec<&str> = EXPECTED_TOOLS
            .iter()
            .copied()
            .filter(|tool| {
                let found = ctx.executor.which(tool);
                if found {
                    ctx.log.debug(&format!("found: {tool}"));
                } else {
                    ctx.log.warn(&format!("{tool} is not installed"));
                }
                !found
            })
            .collect();

        if missing.is_empty() {
            ctx.log
                .info(&format!("all {} tools installed", EXPECTED_TOOLS.len()));
            return Ok(TaskResult::Ok);
        }
        Ok(TaskResult::Skipped(format!("missing: {}", missing.join(", "))))
    }
}
