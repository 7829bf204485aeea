//! Coloured stderr logger for the `log` facade

use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_line(record.level(), record.target(), &record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::Error => "ERROR".red().bold(),
        Level::Warn => "WARN ".yellow(),
        Level::Info => "INFO ".green(),
        Level::Debug => "DEBUG".blue(),
        Level::Trace => "TRACE".dimmed(),
    }
}

/// One log line: level, target, message
pub fn format_line(level: Level, target: &str, message: &str) -> String {
    format!("{} {} {}", level_tag(level), target.dimmed(), message)
}

/// Install the logger; a second call leaves the first logger in place
pub fn init(level: LevelFilter, color: bool) {
    if !color {
        colored::control::set_override(false);
    }
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
