//! Coloured console log lines, one colour per kind of entry.
//!
//! Lines can be narrowed to some kinds and to a search text, and carry a UTC
//! wall-clock prefix unless timestamps are switched off.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub static SHOW_TIMESTAMPS: AtomicBool = AtomicBool::new(true);
static FILTER: Mutex<LogFilter> = Mutex::new(LogFilter::new());

pub const ALL_KINDS: [LogKind; 8] = [
    LogKind::Midi,
    LogKind::Sysex,
    LogKind::Info,
    LogKind::Warning,
    LogKind::Error,
    LogKind::Debug,
    LogKind::Success,
    LogKind::Comment,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Midi,
    Sysex,
    Info,
    Warning,
    Error,
    Debug,
    Success,
    Comment,
}

impl LogKind {
    pub fn label(self) -> &'static str {
        match self {
            LogKind::Midi => "midi",
            LogKind::Sysex => "sysex",
            LogKind::Info => "info",
            LogKind::Warning => "warning",
            LogKind::Error => "error",
            LogKind::Debug => "debug",
            LogKind::Success => "success",
            LogKind::Comment => "comment",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        ALL_KINDS.into_iter().find(|kind| kind.label().eq_ignore_ascii_case(label))
    }

    fn color(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            LogKind::Midi => spec.set_fg(Some(Color::Cyan)),
            LogKind::Sysex => spec.set_fg(Some(Color::Magenta)).set_intense(true),
            LogKind::Info => spec.set_fg(Some(Color::Blue)).set_intense(true),
            LogKind::Warning => spec.set_fg(Some(Color::Yellow)),
            LogKind::Error => spec.set_fg(Some(Color::Red)).set_intense(true),
            LogKind::Debug => spec.set_dimmed(true),
            LogKind::Success => spec.set_fg(Some(Color::Green)).set_intense(true),
            LogKind::Comment => spec.set_italic(true),
        };
        spec
    }
}

/// Parse kind labels, returning the first one that names no kind.
pub fn parse_kinds<'a, I>(labels: I) -> Result<Vec<LogKind>, &'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    labels
        .into_iter()
        .map(|label| LogKind::from_label(label).ok_or(label))
        .collect()
}

/// Which lines are printed. Empty kinds and empty search show everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub kinds: Vec<LogKind>,
    pub search: String,
}

impl LogFilter {
    pub const fn new() -> Self {
        Self {
            kinds: Vec::new(),
            search: String::new(),
        }
    }

    pub fn shows(&self, kind: LogKind, message: &str) -> bool {
        let kind_match = self.kinds.is_empty() || self.kinds.contains(&kind);
        let needle = self.search.trim().to_lowercase();
        let search_match =
            needle.is_empty() || message.to_lowercase().contains(&needle) || kind.label().contains(&needle);
        kind_match && search_match
    }
}

pub fn set_filter_kinds(kinds: Vec<LogKind>) {
    crate::lock_slot(&FILTER).kinds = kinds;
}

pub fn set_search(text: &str) {
    crate::lock_slot(&FILTER).search = text.trim().to_string();
}

/// `HH:MM:SS.mmm` of the UTC time of day.
pub fn format_timestamp(since_epoch: Duration) -> String {
    let secs = since_epoch.as_secs() % 86_400;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600,
        secs / 60 % 60,
        secs % 60,
        since_epoch.subsec_millis()
    )
}

/// Print one log line as `[kind] message` if the current filter shows it.
pub fn log(kind: LogKind, message: &str) {
    if crate::lock_slot(&FILTER).shows(kind, message) {
        log_unfiltered(kind, message);
    }
}

/// Print regardless of the filter, for replies to the filter commands.
pub fn log_unfiltered(kind: LogKind, message: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    if SHOW_TIMESTAMPS.load(Ordering::Relaxed) {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        let _ = stdout.set_color(ColorSpec::new().set_dimmed(true));
        let _ = write!(&mut stdout, "{} ", format_timestamp(now));
    }
    let _ = stdout.set_color(&kind.color());
    let _ = write!(&mut stdout, "[{:>7}]", kind.label());
    let _ = stdout.reset();
    let _ = writeln!(&mut stdout, " {}", message);
}

pub fn print_quick_help() {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_intense(true));
    let _ = writeln!(&mut stdout, "Type 'help' for commands, 'exit' to quit");
    let _ = stdout.reset();
}

pub fn print_connections_active(input: &str, output: &str) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_intense(true));
    let _ = writeln!(&mut stdout, "Listening on '{}', sending to '{}'", input, output);
    let _ = stdout.reset();
    print_quick_help();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_distinct() {
        let mut labels: Vec<_> = ALL_KINDS.iter().map(|k| k.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), ALL_KINDS.len());
    }

    #[test]
    fn test_from_label() {
        for kind in ALL_KINDS {
            assert_eq!(LogKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(LogKind::from_label("SysEx"), Some(LogKind::Sysex));
        assert_eq!(LogKind::from_label("alert"), None);
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(parse_kinds(["midi", "SYSEX"]), Ok(vec![LogKind::Midi, LogKind::Sysex]));
        assert_eq!(parse_kinds(["midi", "notes"]), Err("notes"));
        assert_eq!(parse_kinds(Vec::<&str>::new()), Ok(vec![]));
    }

    #[test]
    fn test_empty_filter_shows_everything() {
        let filter = LogFilter::default();
        for kind in ALL_KINDS {
            assert!(filter.shows(kind, "anything"));
        }
    }

    #[test]
    fn test_filter_by_kind() {
        let filter = LogFilter {
            kinds: vec![LogKind::Sysex],
            search: String::new(),
        };
        assert!(filter.shows(LogKind::Sysex, "Type: System Exclusive"));
        assert!(!filter.shows(LogKind::Midi, "Type: Note On, Channel: 1"));
        assert!(!filter.shows(LogKind::Warning, "Nothing to send"));
    }

    #[test]
    fn test_filter_by_search() {
        let filter = LogFilter {
            kinds: Vec::new(),
            search: "note on".to_string(),
        };
        assert!(filter.shows(LogKind::Midi, "Type: Note On, Channel: 1, Note: C4 (60), Velocity: 100"));
        assert!(!filter.shows(LogKind::Midi, "Type: Program Change, Channel: 1, Program: 5"));

        let filter = LogFilter {
            kinds: vec![LogKind::Midi, LogKind::Warning],
            search: "WARN".to_string(),
        };
        assert!(filter.shows(LogKind::Warning, "Nothing to send"));
        assert!(!filter.shows(LogKind::Midi, "Type: Note On"));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(Duration::ZERO), "00:00:00.000");
        assert_eq!(format_timestamp(Duration::from_millis(45_296_789)), "12:34:56.789");
        // wraps at midnight
        assert_eq!(format_timestamp(Duration::from_secs(86_400 * 3 + 61)), "00:01:01.000");
    }
}
