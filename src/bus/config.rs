//! # Bus configuration.
//!
//! Provides [`Config`] centralized settings for one [`Bus`](crate::Bus) instance.
//!
//! ## Sentinel values
//! - `max_listeners_per_kind = 0` → no listener ceiling (capacity warning disabled)

/// Configuration of a bus instance.
///
/// Defines:
/// - **Capacity guard**: soft ceiling on listeners per kind
/// - **Diagnostics**: which listener failures reach the logging collaborator
///
/// ## Field semantics
/// - `max_listeners_per_kind`: warn when a kind holds more listeners than this (`0` = never warn)
/// - `log_errors_on_continue`: log errors collected by `continue_on_error` passes
/// - `report_scheduled_failures`: log failures of scheduled (async) listeners
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Soft ceiling on listeners registered for a single kind.
    ///
    /// Exceeding it never fails a registration; it only emits a `Warn` record
    /// with the kind, the new count and the limit.
    ///
    /// - `0` = unlimited (no warning)
    /// - `n > 0` = warn when `count > n`
    pub max_listeners_per_kind: usize,

    /// Whether errors collected by a `continue_on_error` pass are logged.
    ///
    /// The pass itself still returns `Ok(())` either way.
    pub log_errors_on_continue: bool,

    /// Whether failures of scheduled listeners are logged by their worker.
    ///
    /// They are never returned to the publisher nor counted in telemetry.
    pub report_scheduled_failures: bool,
}

impl Config {
    /// Returns the listener ceiling as an `Option`.
    ///
    /// - `None` → no ceiling
    /// - `Some(n)` → warn above `n` listeners for one kind
    #[inline]
    pub fn listener_ceiling(&self) -> Option<usize> {
        if self.max_listeners_per_kind == 0 {
            None
        } else {
            Some(self.max_listeners_per_kind)
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `max_listeners_per_kind = 100`
    /// - `log_errors_on_continue = true`
    /// - `report_scheduled_failures = true`
    fn default() -> Self {
        Self {
            max_listeners_per_kind: 100,
            log_errors_on_continue: true,
            report_scheduled_failures: true,
        }
    }
}
