use std::cell::RefCell;

use crate::severity::LogSeverity;

/// Sink for non-fatal diagnostics raised while decoding, encoding or transforming.
pub trait Reporter {
    fn report(&self, severity: LogSeverity, message: &str);

    fn warn(&self, message: &str) {
        self.report(LogSeverity::Warning, message);
    }
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, severity: LogSeverity, message: &str) {
        log::log!(severity.level(), "{}", message);
    }
}

/// Keeps every diagnostic in memory, in the order it was raised.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    entries: RefCell<Vec<(LogSeverity, String)>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        CollectingReporter::default()
    }

    pub fn entries(&self) -> Vec<(LogSeverity, String)> {
        self.entries.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn count(&self, severity: LogSeverity) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(entry, _)| *entry == severity)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, severity: LogSeverity, message: &str) {
        self.entries.borrow_mut().push((severity, message.to_owned()));
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, severity: LogSeverity, message: &str) {
        (**self).report(severity, message);
    }
}
