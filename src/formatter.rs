//! Log line format carrying the simulation tick alongside wall-clock time.
//!
//! `HH:MM:SS.sssss 0xTICK LEVEL span{fields}: target: message`

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// Simulation ticks run so far. Advanced by `Game::tick`.
static TICK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Only the low 16 bits of the tick are printed.
const TICK_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:5]");

#[derive(Clone, Copy)]
enum Style {
    Dim,
    Bold,
}

impl Style {
    const fn code(self) -> &'static str {
        match self {
            Style::Dim => "\x1b[2m",
            Style::Bold => "\x1b[1m",
        }
    }
}

/// Writes `value`, wrapped in the style's escape codes when the writer supports ANSI.
fn paint(writer: &mut Writer<'_>, style: Style, value: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{}{}\x1b[0m", style.code(), value)
    } else {
        write!(writer, "{}", value)
    }
}

/// Five-character level label and its ANSI colour.
fn level_label(level: &Level) -> (&'static str, &'static str) {
    match *level {
        Level::TRACE => ("\x1b[35m", "TRACE"),
        Level::DEBUG => ("\x1b[34m", "DEBUG"),
        Level::INFO => ("\x1b[32m", " INFO"),
        Level::WARN => ("\x1b[33m", " WARN"),
        Level::ERROR => ("\x1b[31m", "ERROR"),
    }
}

/// Event formatter used by [`crate::logging::setup_logging`].
pub struct CustomFormatter;

impl<S, N> FormatEvent<S, N> for CustomFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let timestamp = OffsetDateTime::now_utc().format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        paint(&mut writer, Style::Dim, timestamp)?;
        writer.write_char(' ')?;

        paint(&mut writer, Style::Dim, format_args!("0x{:04X}", get_tick_count() & TICK_DISPLAY_MASK))?;
        writer.write_char(' ')?;

        let (color, label) = level_label(meta.level());
        if writer.has_ansi_escapes() {
            write!(writer, "{color}{label}\x1b[0m ")?;
        } else {
            write!(writer, "{label} ")?;
        }

        if let Some(scope) = ctx.event_scope() {
            let mut any_spans = false;
            for span in scope.from_root() {
                any_spans = true;
                paint(&mut writer, Style::Bold, span.metadata().name())?;

                let extensions = span.extensions();
                if let Some(fields) = extensions.get::<FormattedFields<N>>().filter(|fields| !fields.is_empty()) {
                    paint(&mut writer, Style::Bold, "{")?;
                    write!(writer, "{}", fields)?;
                    paint(&mut writer, Style::Bold, "}")?;
                }
                paint(&mut writer, Style::Dim, ":")?;
            }
            if any_spans {
                writer.write_char(' ')?;
            }
        }

        paint(&mut writer, Style::Dim, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Advances the tick shown in log lines by one.
pub fn increment_tick() {
    TICK_COUNTER.fetch_add(1, Ordering::Relaxed);
}

pub fn get_tick_count() -> u64 {
    TICK_COUNTER.load(Ordering::Relaxed)
}
