//! # Dispatch passes over a listener snapshot.
//!
//! ```text
//! inline:     snapshot ─► claim(once?) ─► invoke ─► Err? ─┬─ strict   ─► record partial ─► Err
//!                                                         └─ continue ─► collect ─► record ─► log
//!
//! scheduled:  snapshot ─► claim(once?) ─► Handle::spawn(invoke) ─► record(errors = 0)
//!                                                 └─► Err/panic ─► log (if reporting is on)
//! ```
//!
//! ## Panic handling
//! Listener panics are caught with `catch_unwind` and turned into
//! [`ListenerError::Panicked`]. `AssertUnwindSafe` is used, so a listener that
//! panics while holding a lock on its own state may leave that state inconsistent.

use std::any::TypeId;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;

use super::bus::Shared;
use super::registry::Resolved;
use crate::error::{BusError, ListenerError};
use crate::events::{Event, KindId};
use crate::listeners::{Listen, ListenerResult};
use crate::loggers::LogRecord;

/// Runs one listener, converting a panic into [`ListenerError::Panicked`].
fn invoke<E: Event>(listener: &dyn Listen<E>, event: &E) -> ListenerResult {
    match std::panic::catch_unwind(AssertUnwindSafe(|| listener.on_event(event))) {
        Ok(res) => res,
        Err(panic) => Err(ListenerError::from_panic(panic.as_ref())),
    }
}

/// Consumes a once-entry right before it runs.
///
/// Returns `false` if another pass already consumed it. An entry unsubscribed
/// after this pass took its snapshot still runs; its flag is what counts.
fn claim<E: Event>(shared: &Shared, resolved: &Resolved<E>) -> bool {
    let Some(flag) = &resolved.once else {
        return true;
    };
    if flag.swap(true, Ordering::AcqRel) {
        return false;
    }
    shared
        .registry
        .write()
        .remove_once(TypeId::of::<E>(), resolved.id, flag);
    true
}

fn failure_record(kind: &'static str, listener: &'static str, err: &ListenerError) -> LogRecord {
    LogRecord::warn("listener failed")
        .with("kind", kind)
        .with("listener", listener)
        .with("label", err.as_label())
        .with("error", err)
}

/// Invokes every listener of the snapshot on the calling thread.
pub(crate) fn run_inline<E: Event>(
    shared: &Shared,
    event: &E,
    snapshot: Vec<Resolved<E>>,
    continue_on_error: bool,
) -> Result<(), BusError> {
    let kind = KindId::of::<E>();
    let started = Instant::now();
    let mut attempted = 0usize;
    let mut failures: Vec<(&'static str, ListenerError)> = Vec::new();

    for resolved in &snapshot {
        if !claim(shared, resolved) {
            continue;
        }
        attempted += 1;

        if let Err(err) = invoke(resolved.listener.as_ref(), event) {
            let name = resolved.listener.name();
            if !continue_on_error {
                shared.telemetry.record(kind, started.elapsed(), attempted, 1);
                tracing::trace!(target: "eventvisor", kind = E::KIND, listener = name, "inline pass aborted");
                return Err(BusError::ListenerFailure {
                    kind: E::KIND,
                    listener: name,
                    source: err,
                });
            }
            failures.push((name, err));
        }
    }

    if attempted == 0 {
        return Ok(());
    }
    shared
        .telemetry
        .record(kind, started.elapsed(), attempted, failures.len());
    tracing::trace!(
        target: "eventvisor",
        kind = E::KIND,
        attempted,
        errors = failures.len(),
        "inline pass finished"
    );

    if shared.cfg.log_errors_on_continue {
        for (name, err) in &failures {
            shared.logger.log(failure_record(E::KIND, *name, err));
        }
    }
    Ok(())
}

/// Spawns every listener of the snapshot on `handle` and returns right away.
pub(crate) fn schedule<E: Event>(
    shared: &Shared,
    handle: &tokio::runtime::Handle,
    event: E,
    snapshot: Vec<Resolved<E>>,
) {
    let kind = KindId::of::<E>();
    let started = Instant::now();
    let event = Arc::new(event);
    let mut scheduled = 0usize;

    for resolved in snapshot {
        if !claim(shared, &resolved) {
            continue;
        }
        scheduled += 1;

        let listener = resolved.listener;
        let event = Arc::clone(&event);
        let logger = shared
            .cfg
            .report_scheduled_failures
            .then(|| Arc::clone(&shared.logger));

        handle.spawn(async move {
            let fut = async { listener.on_event(event.as_ref()) };
            let outcome = match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(res) => res,
                Err(panic) => Err(ListenerError::from_panic(panic.as_ref())),
            };
            if let (Err(err), Some(logger)) = (outcome, logger) {
                logger.log(failure_record(E::KIND, listener.name(), &err).with("mode", "scheduled"));
            }
        });
    }

    if scheduled > 0 {
        shared.telemetry.record(kind, started.elapsed(), scheduled, 0);
        tracing::trace!(target: "eventvisor", kind = E::KIND, scheduled, "scheduled pass queued");
    }
}
