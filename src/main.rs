//! `dotfiles` binary entry point.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use dotfiles_installer::{cli, commands, config, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let mut args = cli::Cli::parse();

    if matches!(args.command, cli::Command::Version) {
        commands::version::run();
        return Ok(());
    }

    // Resolve home once so the log and the links agree on it.
    let home = config::resolve_home(args.global.home.as_deref())?;
    let name = args.command.name();
    let log_file = logging::log_file_path(name, &home);
    let has_file = logging::init_subscriber(args.verbose, &log_file);
    let log = Arc::new(logging::Logger::new(has_file.then_some(log_file)));
    args.global.home = Some(home);

    match &args.command {
        cli::Command::Install(opts) => commands::install::run(&args.global, opts, &log),
        cli::Command::Uninstall => commands::uninstall::run(&args.global, &log),
        cli::Command::Verify => commands::verify::run(&args.global, &log),
        cli::Command::Version => Ok(()),
    }
}
