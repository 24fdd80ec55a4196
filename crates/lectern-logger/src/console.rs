use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;

use crate::log::format_line;
use crate::severity::LogSeverity;

/// Environment variable holding the console log level.
pub const LOG_ENV: &str = "LECTERN_LOG";

static LOGGER: OnceCell<ConsoleLogger> = OnceCell::new();

/// Prints `log` records to stdout in the `[SEVERITY] <timestamp> <message>` layout.
#[derive(Debug)]
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub fn new(severity: LogSeverity) -> Self {
        ConsoleLogger {
            level: severity.level_filter(),
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{}", format_line(LogSeverity::from(record.level()), record.args()));
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// Installs the console logger. Only the first call in a process has any effect;
/// later calls return the error from `log::set_logger`.
pub fn init(severity: LogSeverity) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| ConsoleLogger::new(severity));
    log::set_logger(logger)?;
    log::set_max_level(logger.level());
    Ok(())
}

/// Installs the console logger at the level named by `LECTERN_LOG`, defaulting to info.
pub fn init_from_env() -> Result<(), SetLoggerError> {
    init(severity_from_env(std::env::var(LOG_ENV).ok().as_deref()))
}

fn severity_from_env(value: Option<&str>) -> LogSeverity {
    value
        .and_then(|value| value.parse().ok())
        .unwrap_or(LogSeverity::Info)
}
