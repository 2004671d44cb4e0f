//! # Per-call options for publishing and subscribing.

/// How a dispatch pass runs its listeners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchMode {
    /// Invoke listeners one at a time on the calling thread, in snapshot order (default).
    #[default]
    Inline,
    /// Spawn each listener on the current tokio runtime and return right away.
    ///
    /// No ordering between scheduled listeners, no cancellation, failures are
    /// not returned to the publisher.
    Scheduled,
}

/// Options of one [`Bus::publish`](crate::Bus::publish) call.
///
/// Defaults: inline dispatch, strict failure policy (first failure aborts the pass).
///
/// # Example
/// ```
/// use eventvisor::{DispatchMode, PublishOptions};
///
/// let opts = PublishOptions::new().continue_on_error();
/// assert_eq!(opts.mode, DispatchMode::Inline);
/// assert!(opts.continue_on_error);
///
/// let opts = PublishOptions::scheduled();
/// assert_eq!(opts.mode, DispatchMode::Scheduled);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PublishOptions {
    pub mode: DispatchMode,
    /// Attempt every listener even if some fail (inline mode only).
    pub continue_on_error: bool,
}

impl PublishOptions {
    /// Default options.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for scheduled (asynchronous) dispatch.
    #[inline]
    pub fn scheduled() -> Self {
        Self {
            mode: DispatchMode::Scheduled,
            ..Self::default()
        }
    }

    /// Switches to best-effort delivery.
    #[inline]
    pub fn continue_on_error(mut self) -> Self {
        self.continue_on_error = true;
        self
    }

    /// Sets the dispatch mode.
    #[inline]
    pub fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Options of one subscription.
///
/// - `priority`: higher runs first; equal priorities keep insertion order (default `0`)
/// - `weak`: hold the listener weakly; it silently stops receiving events once
///   every strong handle is dropped
/// - `once`: remove the entry right before its first invocation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubscribeOptions {
    pub priority: i32,
    pub weak: bool,
    pub once: bool,
}

impl SubscribeOptions {
    /// Default options.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the priority.
    #[inline]
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Holds the listener weakly.
    #[inline]
    pub fn weak(mut self) -> Self {
        self.weak = true;
        self
    }

    /// Removes the entry before its first invocation.
    #[inline]
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }
}
