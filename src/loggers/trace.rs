//! # TracingLog: forwards records to `tracing`
//!
//! Default logger of [`Bus`](crate::Bus). Every record becomes one `tracing`
//! event with target `eventvisor`; context fields are rendered into a single
//! `context` field since `tracing` field names must be known statically.

use super::{Log, LogRecord, Severity};

/// Logger backed by the `tracing` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLog;

impl TracingLog {
    /// Construct a new [`TracingLog`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn render(fields: &[(&'static str, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Log for TracingLog {
    fn log(&self, record: LogRecord) {
        let context = render(&record.fields);
        match record.severity {
            Severity::Debug => {
                tracing::debug!(target: "eventvisor", context = %context, "{}", record.message)
            }
            Severity::Info => {
                tracing::info!(target: "eventvisor", context = %context, "{}", record.message)
            }
            Severity::Warn => {
                tracing::warn!(target: "eventvisor", context = %context, "{}", record.message)
            }
            Severity::Error => {
                tracing::error!(target: "eventvisor", context = %context, "{}", record.message)
            }
        }
    }

    fn name(&self) -> &'static str {
        "TracingLog"
    }
}
