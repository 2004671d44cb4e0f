//! # MemoryLog: in-memory record sink
//!
//! Keeps every record it receives, in arrival order. Handy for asserting on
//! bus diagnostics in tests or for tooling that renders them later.

use parking_lot::Mutex;

use super::{Log, LogRecord, Severity};

/// Logger that stores records in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLog {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record received so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Returns a copy of the records with the given severity.
    pub fn with_severity(&self, severity: Severity) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.severity == severity)
            .cloned()
            .collect()
    }

    /// Number of records received so far.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// True if nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Removes and returns every stored record.
    pub fn drain(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl Log for MemoryLog {
    fn log(&self, record: LogRecord) {
        self.records.lock().push(record);
    }

    fn name(&self) -> &'static str {
        "MemoryLog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_keep_order_and_drain() {
        let log = MemoryLog::new();
        log.log(LogRecord::info("first"));
        log.log(LogRecord::warn("second"));

        assert_eq!(log.len(), 2);
        assert_eq!(log.with_severity(Severity::Warn)[0].message, "second");

        let drained = log.drain();
        assert_eq!(drained[0].message, "first");
        assert!(log.is_empty());
    }
}
