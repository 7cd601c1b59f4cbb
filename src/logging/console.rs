//! Console rendering: coloured severity tags, `==>` stage headers, indented
//! detail lines.
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::{LineKind, event_message};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[1;34m";

/// Event formatter for the terminal.
pub(super) struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let msg = event_message(event);
        writeln!(writer, "{}", render(LineKind::of(event.metadata()), &msg))
    }
}

fn render(kind: LineKind, msg: &str) -> String {
    match kind {
        LineKind::Error => format!("{RED}ERROR{RESET} {msg}"),
        LineKind::Warn => format!("{YELLOW}WARN{RESET}  {msg}"),
        LineKind::Stage => format!("{BLUE}==>{RESET} {BOLD}{msg}{RESET}"),
        LineKind::DryRun => format!("  {YELLOW}[DRY RUN]{RESET} {msg}"),
        LineKind::Info => format!("  {msg}"),
        LineKind::Debug => format!("  {DIM}{msg}{RESET}"),
    }
}
