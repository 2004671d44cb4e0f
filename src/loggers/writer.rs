//! # LogWriter: simple record printer
//!
//! A minimal logger that prints incoming [`LogRecord`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [eventvisor] [warn] listener ceiling exceeded kind="selection.changed" count="101" limit="100"
//! [eventvisor] [warn] listener failed kind="export.completed" listener="toast" error="boom"
//! [eventvisor] [info] dispatch summary kind="frame.tick" count="240" avg_us="12"
//! ```

use super::{Log, LogRecord};

/// Stdout logger.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Log for LogWriter {
    fn log(&self, record: LogRecord) {
        println!("[eventvisor] {record}");
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
