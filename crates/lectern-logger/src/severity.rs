use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Log severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogSeverity {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl LogSeverity {
    /// The `log` facade level this severity is emitted at. `Fatal` has no
    /// facade counterpart and is emitted as an error.
    pub fn level(self) -> log::Level {
        match self {
            LogSeverity::Debug => log::Level::Debug,
            LogSeverity::Info => log::Level::Info,
            LogSeverity::Warning => log::Level::Warn,
            LogSeverity::Error | LogSeverity::Fatal => log::Level::Error,
        }
    }

    pub fn level_filter(self) -> log::LevelFilter {
        self.level().to_level_filter()
    }
}

impl From<log::Level> for LogSeverity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace | log::Level::Debug => LogSeverity::Debug,
            log::Level::Info => LogSeverity::Info,
            log::Level::Warn => LogSeverity::Warning,
            log::Level::Error => LogSeverity::Error,
        }
    }
}

/// Display impl for LogSeverity
impl Display for LogSeverity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogSeverity::Debug => write!(f, "DEBUG"),
            LogSeverity::Info => write!(f, "INFO"),
            LogSeverity::Warning => write!(f, "WARNING"),
            LogSeverity::Error => write!(f, "ERROR"),
            LogSeverity::Fatal => write!(f, "FATAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log severity: {0}")]
pub struct UnknownSeverity(pub String);

impl FromStr for LogSeverity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(LogSeverity::Debug),
            "info" => Ok(LogSeverity::Info),
            "warn" | "warning" => Ok(LogSeverity::Warning),
            "error" => Ok(LogSeverity::Error),
            "fatal" => Ok(LogSeverity::Fatal),
            _ => Err(UnknownSeverity(s.to_owned())),
        }
    }
}
