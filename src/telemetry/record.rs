//! # Performance record of one event kind.

use std::time::{Duration, SystemTime};

/// Rolling statistics for one event kind.
///
/// - `count`: recorded passes (starting from 1)
/// - `last`, `average`, `min`, `max`: pass durations
/// - `listener_count`, `error_count`: listeners attempted and errors observed in the last pass
/// - `total_errors`: errors observed across every recorded pass
/// - `at`: wall-clock timestamp of the last pass
#[derive(Clone, Debug, PartialEq)]
pub struct PerfRecord {
    pub count: u64,
    pub last: Duration,
    pub average: Duration,
    pub min: Duration,
    pub max: Duration,
    pub listener_count: usize,
    pub error_count: usize,
    pub total_errors: u64,
    pub at: SystemTime,

    /// Unrounded rolling average in nanoseconds.
    avg_ns: f64,
}

impl PerfRecord {
    /// Creates a record from its first sample.
    pub(crate) fn first(duration: Duration, listener_count: usize, error_count: usize) -> Self {
        Self {
            count: 1,
            last: duration,
            average: duration,
            min: duration,
            max: duration,
            listener_count,
            error_count,
            total_errors: error_count as u64,
            at: SystemTime::now(),
            avg_ns: duration.as_nanos() as f64,
        }
    }

    /// Folds one more sample into the record.
    ///
    /// `average = (average * (count - 1) + duration) / count`, computed on the
    /// unrounded value so repeated updates do not drift.
    pub(crate) fn update(&mut self, duration: Duration, listener_count: usize, error_count: usize) {
        self.count = self.count.saturating_add(1);
        let n = self.count as f64;
        self.avg_ns = (self.avg_ns * (n - 1.0) + duration.as_nanos() as f64) / n;
        self.average = nanos_to_duration(self.avg_ns);

        self.last = duration;
        self.min = self.min.min(duration);
        self.max = self.max.max(duration);

        self.listener_count = listener_count;
        self.error_count = error_count;
        self.total_errors = self.total_errors.saturating_add(error_count as u64);
        self.at = SystemTime::now();
    }
}

fn nanos_to_duration(ns: f64) -> Duration {
    if ns.is_nan() || ns <= 0.0 {
        return Duration::ZERO;
    }
    if ns >= u64::MAX as f64 {
        return Duration::from_nanos(u64::MAX);
    }
    Duration::from_nanos(ns.round() as u64)
}
