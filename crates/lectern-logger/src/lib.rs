pub mod console;
pub mod log;
pub mod report;
pub mod severity;
pub mod systime;

pub use console::{init, init_from_env, ConsoleLogger, LOG_ENV};
pub use self::log::{format_line, log};
pub use report::{CollectingReporter, LogReporter, Reporter};
pub use severity::LogSeverity;
pub use systime::now;
