#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `install` command.
//!
//! These run [`install`] end to end against a temporary repository and home,
//! with the package step skipped and an executor that finds no programs.
#![cfg(unix)]

mod common;

use common::{IntegrationTestContext, context_with_config, links_only, setup_repo};
use dotfiles_installer::commands::install::install;
use dotfiles_installer::config::Config;
use dotfiles_installer::config::links::{LINKS, LinkSpec};
use dotfiles_installer::error::InstallError;
use dotfiles_installer::tasks::RunOptions;

// ---------------------------------------------------------------------------
// Snapshot: link table
// ---------------------------------------------------------------------------

/// Snapshot of the link table in creation order.
///
/// Any addition, removal, or reorder of a link fails this test and needs a
/// deliberate snapshot update.
#[test]
fn link_table() {
    let table: Vec<String> = LINKS
        .iter()
        .map(|l| format!("{} -> {}", l.source, l.destination))
        .collect();
    insta::assert_snapshot!("link_table", table.join("\n"));
}

// ---------------------------------------------------------------------------
// Fresh install
// ---------------------------------------------------------------------------

#[test]
fn fresh_install_links_everything() {
    let t = IntegrationTestContext::new();
    let (ctx, log) = t.context(links_only());

    let report = install(&ctx).unwrap();

    assert!(report.is_success());
    assert!(report.problems.is_empty());
    assert_eq!(log.failure_count(), 0);
    for link in LINKS {
        let dest = t.home().join(link.destination);
        let target = std::fs::read_link(&dest).expect("destination is a symlink");
        assert_eq!(target, t.root().canonicalize().unwrap().join(link.source));
    }
}

#[test]
fn second_install_changes_nothing() {
    let t = IntegrationTestContext::new();
    let (ctx, _log) = t.context(links_only());
    install(&ctx).unwrap();
    let before = std::fs::symlink_metadata(t.home().join(".config/fish"))
        .unwrap()
        .modified()
        .unwrap();

    let (ctx, _log) = t.context(links_only());
    let report = install(&ctx).unwrap();

    assert!(report.is_success());
    assert!(report.problems.is_empty());
    let after = std::fs::symlink_metadata(t.home().join(".config/fish"))
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(before, after, "correct link must not be recreated");
}

#[test]
fn tmux_link_is_created_directly_under_home() {
    let t = IntegrationTestContext::new();
    let (ctx, _log) = t.context(links_only());

    install(&ctx).unwrap();

    let dest = t.home().join(".tmux.conf");
    assert!(dest.symlink_metadata().unwrap().file_type().is_symlink());
    assert_eq!(std::fs::read_to_string(dest).unwrap(), "# test\n");
}

// ---------------------------------------------------------------------------
// Problems
// ---------------------------------------------------------------------------

#[test]
fn missing_source_is_reported_once_and_others_still_link() {
    let t = IntegrationTestContext::new();
    t.remove_source("starship");
    let (ctx, _log) = t.context(links_only());

    let report = install(&ctx).unwrap();

    assert!(!report.is_success());
    let failures: Vec<&InstallError> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        failures[0],
        InstallError::MissingSource { path } if path.ends_with("starship")
    ));
    assert!(!t.home().join(".config/starship").exists());
    for dest in [".config/ghostty", ".tmux.conf", ".config/fish", ".config/nvim"] {
        assert!(
            t.home().join(dest).symlink_metadata().is_ok(),
            "{dest} should be linked"
        );
    }
}

#[test]
fn unlinkable_destination_is_reported_and_others_still_link() {
    let t = IntegrationTestContext::new();
    std::fs::write(t.home().join("blocker"), "a file, not a directory").unwrap();
    let mut config = Config::new(t.root(), t.home());
    config.links.insert(
        1,
        LinkSpec {
            source: "fish",
            destination: "blocker/fish",
        },
    );
    let (ctx, _log) = context_with_config(config, links_only());

    let report = install(&ctx).unwrap();

    assert!(!report.is_success());
    let failures: Vec<&InstallError> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        failures[0],
        InstallError::LinkCreationFailed { destination, .. }
            if destination.ends_with("blocker/fish")
    ));
    for link in LINKS {
        assert!(
            std::fs::read_link(t.home().join(link.destination)).is_ok(),
            "{} should be linked",
            link.destination
        );
    }
}

#[test]
fn repository_checked_out_at_a_destination_is_left_intact() {
    let home = tempfile::tempdir().unwrap();
    let repo = home.path().join(".config");
    setup_repo(&repo);
    let (ctx, _log) = context_with_config(Config::new(&repo, home.path()), links_only());

    let report = install(&ctx).unwrap();

    assert!(!report.is_success());
    let failures: Vec<&InstallError> = report.failures().collect();
    assert_eq!(failures.len(), 4);
    assert!(
        failures
            .iter()
            .all(|f| matches!(f, InstallError::LinkCreationFailed { .. }))
    );
    for source in [
        "ghostty/config",
        "fish/config.fish",
        "starship/starship.toml",
        "nvim/init.lua",
    ] {
        let path = repo.join(source);
        assert!(path.is_file(), "{} must survive", path.display());
        assert!(!path.parent().unwrap().is_symlink());
    }
    assert!(std::fs::read_link(home.path().join(".tmux.conf")).is_ok());
}

#[test]
fn unwritable_config_root_is_fatal() {
    let t = IntegrationTestContext::new();
    let home = t.home().join("not-a-dir");
    std::fs::write(&home, "file").unwrap();
    let (ctx, log) = t.context_for_home(&home, links_only());

    let err = install(&ctx).unwrap_err();

    assert!(matches!(err, InstallError::DestinationRootUnwritable { .. }));
    assert!(log.task_entries().is_empty());
}

#[test]
fn missing_package_manager_is_a_warning() {
    let t = IntegrationTestContext::new();
    let (ctx, _log) = t.context(RunOptions::default());

    let report = install(&ctx).unwrap();

    assert!(report.is_success());
    let warnings: Vec<&InstallError> = report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        warnings[0],
        InstallError::PackageManagerUnavailable { program } if program == "brew"
    ));
}

#[test]
fn shell_change_without_fish_is_a_warning() {
    if std::env::var("SHELL").is_ok_and(|s| s.ends_with("/fish")) {
        return;
    }
    let t = IntegrationTestContext::new();
    let options = RunOptions {
        set_shell: true,
        ..links_only()
    };
    let (ctx, _log) = t.context(options);

    let report = install(&ctx).unwrap();

    assert!(report.is_success());
    assert!(
        report
            .warnings()
            .any(|w| matches!(w, InstallError::ShellChangeFailed { .. }))
    );
}

// ---------------------------------------------------------------------------
// Existing destinations
// ---------------------------------------------------------------------------

#[test]
fn repository_wins_over_existing_file_and_directory() {
    let t = IntegrationTestContext::new();
    std::fs::write(t.home().join(".tmux.conf"), "local").unwrap();
    let nvim = t.home().join(".config/nvim");
    std::fs::create_dir_all(nvim.join("lua")).unwrap();
    std::fs::write(nvim.join("lua/local.lua"), "-- local").unwrap();
    let (ctx, _log) = t.context(links_only());

    let report = install(&ctx).unwrap();

    assert!(report.is_success());
    assert!(std::fs::read_link(t.home().join(".tmux.conf")).is_ok());
    assert!(std::fs::read_link(&nvim).is_ok());
    assert!(!t.home().join(".tmux.conf.backup").exists());
}

#[test]
fn stale_link_is_replaced() {
    let t = IntegrationTestContext::new();
    std::fs::create_dir_all(t.home().join(".config")).unwrap();
    std::os::unix::fs::symlink("/nonexistent/fish", t.home().join(".config/fish")).unwrap();
    let (ctx, _log) = t.context(links_only());

    install(&ctx).unwrap();

    let target = std::fs::read_link(t.home().join(".config/fish")).unwrap();
    assert_eq!(target, t.root().canonicalize().unwrap().join("fish"));
}

#[test]
fn backup_keeps_existing_file() {
    let t = IntegrationTestContext::new();
    std::fs::write(t.home().join(".tmux.conf"), "local").unwrap();
    let options = RunOptions {
        backup: true,
        ..links_only()
    };
    let (ctx, _log) = t.context(options);

    install(&ctx).unwrap();

    let backup = t.home().join(".tmux.conf.backup");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), "local");
    assert!(std::fs::read_link(t.home().join(".tmux.conf")).is_ok());
}

#[test]
fn dry_run_leaves_home_untouched() {
    let t = IntegrationTestContext::new();
    let options = RunOptions {
        dry_run: true,
        ..links_only()
    };
    let (ctx, _log) = t.context(options);

    let report = install(&ctx).unwrap();

    assert!(report.is_success());
    assert_eq!(std::fs::read_dir(t.home()).unwrap().count(), 0);
}
