//! # Logging collaborators for the bus.
//!
//! The bus never decides where diagnostics go. It hands a [`LogRecord`]
//! (severity, message, structured context) to an injected [`Log`]
//! implementation and moves on.
//!
//! ## Architecture
//! ```text
//!   Bus ── capacity warning ──────┐
//!   Bus ── continue-on-error ─────┼──► Arc<dyn Log>::log(LogRecord)
//!   scheduled worker ── failure ──┤          │
//!   Bus::log_summary() ───────────┘     ┌────┴─────┬───────────┬──────────┐
//!                                       ▼          ▼           ▼          ▼
//!                                   TracingLog  LogWriter   MemoryLog   NoopLog
//! ```
//!
//! ## Built-ins
//! - [`TracingLog`] forwards to the `tracing` crate (default).
//! - [`LogWriter`] prints to stdout _(feature `logging`, demo/reference only)_.
//! - [`MemoryLog`] keeps records for inspection (tests, tooling).
//! - [`NoopLog`] drops everything.

mod log;
mod memory;
mod trace;
#[cfg(feature = "logging")]
mod writer;

pub use log::{Log, LogRecord, NoopLog, Severity};
pub use memory::MemoryLog;
pub use trace::TracingLog;
#[cfg(feature = "logging")]
pub use writer::LogWriter;
