#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the `uninstall` command's task list.
#![cfg(unix)]

mod common;

use common::{IntegrationTestContext, links_only};
use dotfiles_installer::commands::install::install;
use dotfiles_installer::tasks::{self, RunOptions};

fn uninstall(t: &IntegrationTestContext, options: RunOptions) -> usize {
    let (ctx, log) = t.context(options);
    for task in tasks::all_uninstall_tasks() {
        tasks::execute(task.as_ref(), &ctx);
    }
    log.failure_count()
}

#[test]
fn uninstall_task_names() {
    let tasks = tasks::all_uninstall_tasks();
    let names: Vec<&str> = tasks
        .iter()
        .map(|t| t.name())
        .collect();
    assert_eq!(names, ["Remove symlinks"]);
}

#[test]
fn uninstall_removes_installed_links() {
    let t = IntegrationTestContext::new();
    let (ctx, _log) = t.context(links_only());
    install(&ctx).unwrap();

    assert_eq!(uninstall(&t, RunOptions::default()), 0);

    for dest in [".config/ghostty", ".tmux.conf", ".config/fish", ".config/nvim"] {
        assert!(t.home().join(dest).symlink_metadata().is_err(), "{dest} left behind");
    }
    assert!(t.root().join("fish/config.fish").exists(), "sources are untouched");
    assert!(t.home().join(".config").is_dir(), "config root is kept");
}

#[test]
fn uninstall_leaves_foreign_files_alone() {
    let t = IntegrationTestContext::new();
    std::fs::write(t.home().join(".tmux.conf"), "local").unwrap();
    std::fs::create_dir_all(t.home().join(".config")).unwrap();
    std::os::unix::fs::symlink("/elsewhere/fish", t.home().join(".config/fish")).unwrap();

    assert_eq!(uninstall(&t, RunOptions::default()), 0);

    assert_eq!(
        std::fs::read_to_string(t.home().join(".tmux.conf")).unwrap(),
        "local"
    );
    assert!(std::fs::read_link(t.home().join(".config/fish")).is_ok());
}

#[test]
fn dry_run_uninstall_keeps_links() {
    let t = IntegrationTestContext::new();
    let (ctx, _log) = t.context(links_only());
    install(&ctx).unwrap();

    let options = RunOptions {
        dry_run: true,
        ..RunOptions::default()
    };
    assert_eq!(uninstall(&t, options), 0);

    assert!(std::fs::read_link(t.home().join(".config/nvim")).is_ok());
}
