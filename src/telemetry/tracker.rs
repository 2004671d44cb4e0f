//! # Telemetry tracker.
//!
//! Thread-safe map of [`KindId`] → [`PerfRecord`]. Readers always get copies,
//! so callers can keep or mutate what they read without touching the tracker.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;

use super::PerfRecord;
use crate::events::{Event, KindId};

/// Per-kind dispatch statistics.
///
/// ### Responsibilities
/// - Folds dispatch samples into one record per kind
/// - Hands out independent snapshots for operators and tooling
#[derive(Debug, Default)]
pub struct Telemetry {
    records: RwLock<HashMap<KindId, PerfRecord>>,
}

impl Telemetry {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one dispatch pass.
    ///
    /// ### Rules
    /// - No record yet for `kind` → create one with `count = 1` from this sample
    /// - Otherwise → increment count, roll the average, update min/max,
    ///   overwrite listener count, error count and timestamp
    pub fn record(&self, kind: KindId, duration: Duration, listener_count: usize, error_count: usize) {
        let mut records = self.records.write();
        match records.get_mut(&kind) {
            Some(rec) => rec.update(duration, listener_count, error_count),
            None => {
                records.insert(kind, PerfRecord::first(duration, listener_count, error_count));
            }
        }
    }

    /// Returns a copy of the record for `kind`, if it was ever dispatched.
    pub fn get(&self, kind: &KindId) -> Option<PerfRecord> {
        self.records.read().get(kind).cloned()
    }

    /// Typed shorthand for [`Telemetry::get`].
    pub fn get_kind<E: Event>(&self) -> Option<PerfRecord> {
        self.get(&KindId::of::<E>())
    }

    /// Returns an independent copy of every record.
    pub fn get_all(&self) -> HashMap<KindId, PerfRecord> {
        self.records.read().clone()
    }

    /// Returns every record sorted by kind name.
    pub fn summary(&self) -> Vec<(KindId, PerfRecord)> {
        let mut all: Vec<(KindId, PerfRecord)> = self
            .records
            .read()
            .iter()
            .map(|(k, r)| (*k, r.clone()))
            .collect();
        all.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        all
    }

    /// Number of kinds with a record.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True if no kind has a record.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Discards every record.
    pub fn reset(&self) {
        self.records.write().clear();
    }
}
