use std::fmt::Display;

use crate::severity::LogSeverity;
use crate::systime::now;

/// Formats one console line: `[SEVERITY] <timestamp> <message>`.
pub fn format_line(severity: LogSeverity, msg: impl Display) -> String {
    format!("[{}] {} {}", severity, now(), msg)
}

pub fn log(msg: impl Display, log_severity: LogSeverity) {
    println!("{}", format_line(log_severity, msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let line = format_line(LogSeverity::Warning, "chunk missing");
        assert!(line.starts_with("[WARNING] "));
        assert!(line.ends_with(" chunk missing"));
    }
}
