//! # Per-kind dispatch telemetry.
//!
//! The dispatch engine reports every pass that reached at least one listener;
//! the tracker folds those samples into one [`PerfRecord`] per kind.
//!
//! ## Architecture
//! ```text
//! Bus::publish(ev) ──► pass over snapshot ──► Telemetry::record(kind, elapsed, listeners, errors)
//!                                                    │
//!                                                    ▼
//!                                       HashMap<KindId, PerfRecord>
//!                                 (count, last/avg/min/max, last listeners/errors, at)
//! ```
//!
//! ## Rules
//! - Records are created lazily on the first recorded pass of a kind.
//! - `listener_count`, `error_count` and `at` are **last-value**; durations are aggregated.
//! - Counters never decrease; only [`Telemetry::reset`] discards records.
//! - Kinds that were published with zero subscribers never get a record.

mod record;
mod tracker;

pub use record::PerfRecord;
pub use tracker::Telemetry;
