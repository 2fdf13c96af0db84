//! Subscriber setup for the `animelink` binary.

use std::fmt;
use std::io::IsTerminal;

use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

/// Accepted `--log-level` values (case-insensitive on the command line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    /// Same as `error`; tracing has no separate critical level.
    Critical,
}

impl LogLevel {
    /// Maximum tracing level that passes the filter.
    pub fn as_filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }
}

/// Event format printing `LEVEL    message`, with INFO shown as `DRYRUN`
/// while nothing is being changed on disk.
#[derive(Debug, Clone, Copy)]
pub struct LevelLabel {
    dry_run: bool,
}

impl LevelLabel {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    fn label(&self, level: &Level) -> &'static str {
        if *level == Level::ERROR {
            "ERROR"
        } else if *level == Level::WARN {
            "WARNING"
        } else if *level == Level::INFO {
            if self.dry_run { "DRYRUN" } else { "INFO" }
        } else if *level == Level::DEBUG {
            "DEBUG"
        } else {
            "TRACE"
        }
    }

    fn colour(level: &Level) -> &'static str {
        if *level == Level::ERROR {
            "\x1b[31m"
        } else if *level == Level::WARN {
            "\x1b[33m"
        } else if *level == Level::INFO {
            "\x1b[32m"
        } else {
            "\x1b[36m"
        }
    }
}

impl<S, N> FormatEvent<S, N> for LevelLabel
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = event.metadata().level();
        let label = self.label(level);
        if writer.has_ansi_escapes() {
            write!(writer, "{}{label:<8}\x1b[0m ", Self::colour(level))?;
        } else {
            write!(writer, "{label:<8} ")?;
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Installs the global subscriber: level label first, colours only on a
/// terminal. Logs go to stderr so the metadata JSON on stdout stays
/// machine-readable.
pub fn init(level: LogLevel, dry_run: bool) {
    tracing_subscriber::fmt()
        .with_max_level(level.as_filter())
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .event_format(LevelLabel::new(dry_run))
        .init();
}
