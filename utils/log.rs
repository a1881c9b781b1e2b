//! Simple logging implementation for vmmsim
//!
//! A minimal stderr backend for the `log` facade. Translation output
//! goes to stdout; everything diagnostic goes through here so the two
//! streams never mix.

use log::{Level, LevelFilter, Metadata, Record};

/// Environment variable selecting the log level by name
pub const LOG_ENV: &str = "VMMSIM_LOG";

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let tag = match record.level() {
                Level::Error => "ERROR",
                Level::Warn => "WARN",
                Level::Info => "INFO",
                Level::Debug => "DEBUG",
                Level::Trace => "TRACE",
            };
            eprintln!("[{}] {}", tag, record.args());
        }
    }

    fn flush(&self) {}
}

/// Default level: `Info`, raised by the `debug`/`verbose` features
fn default_level() -> LevelFilter {
    if cfg!(feature = "verbose") {
        LevelFilter::Trace
    } else if cfg!(feature = "debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Parse a level name from the environment
fn level_from_env() -> Option<LevelFilter> {
    let name = std::env::var(LOG_ENV).ok()?;
    match name.to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Install the stderr logger; harmless if a logger is already set
pub fn init() {
    let level = level_from_env().unwrap_or_else(default_level);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
