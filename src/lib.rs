//! # eventvisor
//!
//! **eventvisor** is a typed, in-process event bus for interactive applications.
//!
//! It lets independent parts of an application register interest in event kinds
//! and lets any part publish an occurrence carrying a typed payload. Every current
//! listener is invoked, a failing listener is isolated according to a per-call
//! policy, and the bus keeps its own per-kind latency and error statistics.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Producer    │   │  Producer    │   │  Producer    │
//!     │ (selection)  │   │  (export)    │   │ (frame loop) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ publish(ev, opts)│                  │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Bus (one explicit instance, cloned into every collaborator)      │
//! │  - Registry   (kind → ordered listener set, weak/once/priority)   │
//! │  - Dispatch   (snapshot, inline or scheduled pass, error policy)  │
//! │  - Telemetry  (kind → PerfRecord)                                 │
//! │  - Log        (injected diagnostics sink)                         │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐  Log::log()
//!     │ Listener<E>  │   │ Listener<E>  │   │ Listener<E>  │  (warnings,
//!     │ on_event(&E) │   │ on_event(&E) │   │ on_event(&E) │   summaries)
//!     └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! ### Publish
//! ```text
//! publish(ev, opts)
//!   ├─► validate kind name                 ─► Err(InvalidKind)
//!   ├─► ev.validate()                      ─► Err(InvalidPayload)
//!   ├─► snapshot listeners (lock released)
//!   │       └─ empty ─► Ok(()), no telemetry
//!   ├─► Inline:
//!   │       for each listener in snapshot:
//!   │         ├─ once? remove entry first
//!   │         ├─ Ok        ─► next
//!   │         └─ Err/panic ─┬─ strict   ─► record partial run, Err(ListenerFailure)
//!   │                       └─ continue ─► collect, next
//!   │       record(kind, elapsed, attempted, errors); log collected errors
//!   └─► Scheduled:
//!           spawn each listener on tokio; record(kind, elapsed, scheduled, 0)
//! ```
//!
//! ## Features
//! | Area             | Description                                                  | Key types / traits                           |
//! |------------------|--------------------------------------------------------------|----------------------------------------------|
//! | **Kinds**        | One Rust type per event kind; payload = value of that type.  | [`Event`], [`KindId`]                        |
//! | **Listeners**    | Struct or closure listeners with reference identity.        | [`Listen`], [`Listener`], [`WeakListener`]   |
//! | **Bus**          | Subscribe, publish, snapshot isolation, failure policy.      | [`Bus`], [`PublishOptions`], [`Subscription`]|
//! | **Telemetry**    | Per-kind rolling latency and error statistics.               | [`Telemetry`], [`PerfRecord`]                |
//! | **Logging**      | Injected diagnostics sink.                                   | [`Log`], [`TracingLog`], [`MemoryLog`]       |
//! | **Errors**       | Typed errors for validation and listener failures.          | [`BusError`], [`ListenerError`]              |
//! | **Configuration**| Capacity guard and diagnostics switches.                     | [`Config`], [`BusBuilder`]                   |
//!
//! ## Optional features
//! - `logging`: exports a simple stdout [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use eventvisor::{Bus, Config, Event, Listener, ListenerError, MemoryLog, PublishOptions};
//!
//! #[derive(Debug, Clone)]
//! struct ExportCompleted {
//!     path: String,
//! }
//!
//! impl Event for ExportCompleted {
//!     const KIND: &'static str = "export.completed";
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Composition root: build the one bus and hand clones to collaborators.
//!     let log = Arc::new(MemoryLog::new());
//!     let bus = Bus::builder(Config::default()).with_logger(log.clone()).build();
//!
//!     let toasts = Arc::new(AtomicUsize::new(0));
//!     let t = toasts.clone();
//!     let toast = Listener::named("toast", move |ev: &ExportCompleted| {
//!         assert!(ev.path.ends_with(".png"));
//!         t.fetch_add(1, Ordering::Relaxed);
//!         Ok(())
//!     });
//!     bus.subscribe(&toast)?;
//!     bus.subscribe(&Listener::named("uploader", |_: &ExportCompleted| {
//!         Err(ListenerError::fail("offline"))
//!     }))?;
//!
//!     // Strict by default: the failing uploader surfaces to the publisher.
//!     assert!(bus.emit(ExportCompleted { path: "out.png".into() }).is_err());
//!
//!     // Best effort: everyone runs, the failure goes to the logger.
//!     bus.publish(
//!         ExportCompleted { path: "out.png".into() },
//!         PublishOptions::new().continue_on_error(),
//!     )?;
//!     assert_eq!(toasts.load(Ordering::Relaxed), 2);
//!     assert_eq!(log.len(), 1);
//!
//!     let perf = bus.perf::<ExportCompleted>().expect("dispatched twice");
//!     assert_eq!(perf.count, 2);
//!     assert_eq!(perf.total_errors, 2);
//!     Ok(())
//! }
//! ```
mod bus;
mod error;
mod events;
mod listeners;
mod loggers;
mod telemetry;

// ---- Public re-exports ----

pub use bus::{Bus, BusBuilder, Config, DispatchMode, PublishOptions, SubscribeOptions, Subscription};
pub use error::{BusError, ListenerError};
pub use events::{Event, KindId};
pub use listeners::{Listen, Listener, ListenerResult, WeakListener};
pub use loggers::{Log, LogRecord, MemoryLog, NoopLog, Severity, TracingLog};
pub use telemetry::{PerfRecord, Telemetry};

// Optional: expose a simple built-in stdout logger (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use loggers::LogWriter;
