//! # Event kind declaration.
//!
//! A kind is a Rust type implementing [`Event`]; a value of that type is the
//! payload. Because the registry is keyed by type, a listener for one kind can
//! never receive the payload of another: mismatched publish/subscribe pairs do
//! not compile.
//!
//! ## Example
//! ```rust
//! use eventvisor::Event;
//!
//! #[derive(Debug, Clone)]
//! struct SelectionChanged {
//!     path: String,
//!     start: usize,
//!     end: usize,
//! }
//!
//! impl Event for SelectionChanged {
//!     const KIND: &'static str = "selection.changed";
//!
//!     fn validate(&self) -> Result<(), String> {
//!         if self.start > self.end {
//!             return Err(format!("start {} after end {}", self.start, self.end));
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let ev = SelectionChanged { path: "main.rs".into(), start: 4, end: 2 };
//! assert!(ev.validate().is_err());
//! assert_eq!(SelectionChanged::KIND, "selection.changed");
//! ```

/// Declares an event kind and the payload it carries.
///
/// ### Contract
/// - `KIND` is the stable name used in logs and telemetry; it must not be empty
///   (an empty name is rejected with [`BusError::InvalidKind`](crate::BusError::InvalidKind)).
/// - `validate` runs on every publish before listener resolution; an `Err`
///   is returned as [`BusError::InvalidPayload`](crate::BusError::InvalidPayload).
/// - Payloads are shared with scheduled listeners across threads, hence `Send + Sync + 'static`.
pub trait Event: Send + Sync + 'static {
    /// Human-readable kind name.
    const KIND: &'static str;

    /// Checks the payload before dispatch.
    ///
    /// Accepts every payload by default.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
