//! # Logging collaborator contract.

use std::fmt;

/// Severity of a [`LogRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Lowercase label (`"debug"`, `"info"`, `"warn"`, `"error"`).
    pub fn as_label(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// One diagnostic emitted by the bus.
///
/// - `severity`: how loud the record is
/// - `message`: stable, human-readable summary
/// - `fields`: structured context as `(key, value)` pairs, in emission order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub severity: Severity,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogRecord {
    /// Creates a record with no context.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Shorthand for a `Warn` record.
    #[inline]
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, message)
    }

    /// Shorthand for an `Info` record.
    #[inline]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Attaches one context field.
    #[inline]
    pub fn with(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        self.fields.push((key, value.to_string()));
        self
    }

    /// Returns the value of the first field named `key`.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)?;
        for (k, v) in &self.fields {
            write!(f, " {k}={v:?}")?;
        }
        Ok(())
    }
}

/// Contract for logging collaborators.
///
/// Called synchronously by the bus (and by scheduled workers); implementations
/// should be quick and must not call back into the bus.
pub trait Log: Send + Sync + 'static {
    /// Accepts one record.
    fn log(&self, record: LogRecord);

    /// Human-readable name (for debugging).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Logger that drops every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLog;

impl Log for NoopLog {
    fn log(&self, _record: LogRecord) {}

    fn name(&self) -> &'static str {
        "NoopLog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_display_and_fields() {
        let rec = LogRecord::warn("listener ceiling exceeded")
            .with("kind", "selection.changed")
            .with("count", 101);

        assert_eq!(rec.field("count"), Some("101"));
        assert_eq!(rec.field("missing"), None);
        assert_eq!(
            rec.to_string(),
            "[warn] listener ceiling exceeded kind=\"selection.changed\" count=\"101\""
        );
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Error > Severity::Warn);
        assert!(Severity::Info > Severity::Debug);
    }
}
