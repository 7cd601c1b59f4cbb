//! The per-command run log.
//!
//! Lives at `$XDG_CACHE_HOME/dotfiles/<command>.log`, or under
//! `<home>/.cache` when `XDG_CACHE_HOME` is unset, where `<home>` is the
//! resolved home directory of the run (so `--home` keeps logs out of the real
//! home). Each run truncates the file and starts with a header line.
use std::ffi::OsString;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{LineKind, event_message};

/// Log file for `command` when installing into `home`.
#[must_use]
pub fn log_file_path(command: &str, home: &Path) -> PathBuf {
    cache_root(std::env::var_os("XDG_CACHE_HOME"), home)
        .join("dotfiles")
        .join(format!("{command}.log"))
}

fn cache_root(xdg_cache_home: Option<OsString>, home: &Path) -> PathBuf {
    xdg_cache_home
        .filter(|v| !v.is_empty())
        .map_or_else(|| home.join(".cache"), PathBuf::from)
}

/// [`tracing_subscriber::Layer`] appending every event to the run log.
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Create the log directory, truncate `path`, and write the run header.
    ///
    /// `None` if any of that fails; the run then logs to the console only.
    pub(super) fn create(path: &Path) -> Option<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        let version =
            option_env!("DOTFILES_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let mut file = fs::File::create(path).ok()?;
        writeln!(
            file,
            "# dotfiles {version}, started {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )
        .ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let line = format_line(
            &chrono::Utc::now().format("%H:%M:%S").to_string(),
            LineKind::of(event.metadata()),
            &strip_ansi(&event_message(event)),
        );
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "{line}").ok();
        }
    }
}

fn format_line(time: &str, kind: LineKind, msg: &str) -> String {
    let tag = match kind {
        LineKind::Stage => return format!("[{time}] ==> {msg}"),
        LineKind::DryRun => "[dry run] ",
        LineKind::Error => "[error] ",
        LineKind::Warn => "[warn] ",
        LineKind::Debug => "[debug] ",
        LineKind::Info => "",
    };
    format!("[{time}]     {tag}{msg}")
}

/// Remove ANSI CSI sequences (`ESC [ ... final-byte`) and lone escapes.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() == Some('[') {
            // parameters run until the final byte
            while chars.next().is_some_and(|c| !('@'..='~').contains(&c)) {}
        }
    }
    out
}
