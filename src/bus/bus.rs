//! # Bus: registry, dispatch engine and telemetry behind one handle.
//!
//! The [`Bus`] owns the subscription registry, the telemetry tracker and the
//! logging collaborator. It is cheap to clone and is meant to be created once at
//! the application's composition root and passed to every producer and consumer.
//!
//! ## High-level architecture
//! ```text
//! subscribe*(listener) ──► validate kind ──► Registry::insert ──► ceiling check ──► Subscription
//!
//! publish(ev, opts):
//!   validate kind ──► validate payload ──► (scheduled? require runtime)
//!        └─► Registry::snapshot::<E>()          (lock released before any listener runs)
//!               ├─ empty     ──► Ok(())         (no telemetry record)
//!               ├─ Inline    ──► dispatch::run_inline ──► Telemetry::record ──► Ok / Err
//!               └─ Scheduled ──► dispatch::schedule   ──► Telemetry::record ──► Ok
//! ```
//!
//! ## Rules
//! - **Snapshot isolation**: a pass runs against the listener set as it was when the pass started.
//! - **Re-entrancy**: listeners may subscribe, unsubscribe and publish from inside a pass.
//! - **Idempotent registration**: the same [`Listener`] is stored once per kind.
//! - **Validation first**: kind and payload are checked before any registry work.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::builder::BusBuilder;
use super::dispatch;
use super::options::{DispatchMode, PublishOptions, SubscribeOptions};
use super::registry::{Registry, Target};
use super::subscription::Subscription;
use super::Config;
use crate::error::BusError;
use crate::events::{Event, KindId};
use crate::listeners::{Listener, ListenerResult, WeakListener};
use crate::loggers::{Log, LogRecord};
use crate::telemetry::{PerfRecord, Telemetry};

/// State shared by every clone of a [`Bus`].
pub(crate) struct Shared {
    pub(crate) cfg: Config,
    pub(crate) registry: RwLock<Registry>,
    pub(crate) telemetry: Telemetry,
    pub(crate) logger: Arc<dyn Log>,
}

/// Typed in-process event bus.
///
/// ### Properties
/// - **Cloneable**: clones share listeners and telemetry (internally an `Arc`).
/// - **Thread-safe**: `Send + Sync`; locks are never held while a listener runs.
/// - **Explicit**: there is no global instance; construct one and pass it around.
#[derive(Clone)]
pub struct Bus {
    shared: Arc<Shared>,
}

impl Bus {
    /// Creates a bus with [`Config::default`] and the `tracing` logger.
    pub fn new() -> Self {
        Self::builder(Config::default()).build()
    }

    /// Creates a builder with the given configuration.
    pub fn builder(cfg: Config) -> BusBuilder {
        BusBuilder::new(cfg)
    }

    pub(crate) fn from_parts(cfg: Config, logger: Arc<dyn Log>) -> Self {
        Self {
            shared: Arc::new(Shared {
                cfg,
                registry: RwLock::new(Registry::new()),
                telemetry: Telemetry::new(),
                logger,
            }),
        }
    }

    /// Configuration this bus was built with.
    pub fn config(&self) -> &Config {
        &self.shared.cfg
    }

    /// Telemetry tracker of this bus.
    pub fn telemetry(&self) -> &Telemetry {
        &self.shared.telemetry
    }

    // ---- Subscription registry ----

    /// Registers `listener` for kind `E` with default options.
    ///
    /// Registering a listener that is already present is a no-op and returns a
    /// handle to the existing entry.
    pub fn subscribe<E: Event>(&self, listener: &Listener<E>) -> Result<Subscription, BusError> {
        self.subscribe_with(listener, SubscribeOptions::default())
    }

    /// Registers `listener` for kind `E` with explicit options.
    pub fn subscribe_with<E: Event>(
        &self,
        listener: &Listener<E>,
        opts: SubscribeOptions,
    ) -> Result<Subscription, BusError> {
        let target = if opts.weak {
            Target::Weak(Arc::downgrade(listener.shared()))
        } else {
            Target::Strong(Arc::clone(listener.shared()))
        };
        self.register::<E>(listener.id(), target, opts)
    }

    /// Registers `listener` so that it runs at most once.
    ///
    /// The entry is removed right before the first invocation, so a listener
    /// that publishes `E` again from inside `on_event` does not see itself.
    pub fn subscribe_once<E: Event>(&self, listener: &Listener<E>) -> Result<Subscription, BusError> {
        self.subscribe_with(listener, SubscribeOptions::default().once())
    }

    /// Registers a weak handle; fails with `InvalidListener` if its target is already gone.
    pub fn subscribe_weak<E: Event>(
        &self,
        listener: &WeakListener<E>,
        opts: SubscribeOptions,
    ) -> Result<Subscription, BusError> {
        KindId::of::<E>().validate()?;
        if !listener.is_alive() {
            return Err(BusError::InvalidListener {
                kind: E::KIND,
                reason: "weak listener target was dropped",
            });
        }
        let target = Target::Weak(listener.weak().clone());
        self.register::<E>(listener.id(), target, opts.weak())
    }

    /// Wraps `f` in a fresh [`Listener`] and registers it.
    ///
    /// The bus holds the only strong handle; use the returned [`Subscription`] to remove it.
    pub fn subscribe_fn<E, F>(&self, f: F) -> Result<Subscription, BusError>
    where
        E: Event,
        F: Fn(&E) -> ListenerResult + Send + Sync + 'static,
    {
        self.subscribe(&Listener::from_fn(f))
    }

    fn register<E: Event>(
        &self,
        id: u64,
        target: Target<E>,
        opts: SubscribeOptions,
    ) -> Result<Subscription, BusError> {
        let kind = KindId::of::<E>();
        kind.validate()?;

        let inserted = self
            .shared
            .registry
            .write()
            .insert::<E>(id, target, opts.priority, opts.once);

        if inserted.added {
            tracing::trace!(
                target: "eventvisor",
                kind = E::KIND,
                count = inserted.count,
                priority = opts.priority,
                once = opts.once,
                weak = opts.weak,
                "listener subscribed"
            );
            if let Some(limit) = self.shared.cfg.listener_ceiling() {
                if inserted.count > limit {
                    self.shared.logger.log(
                        LogRecord::warn("listener ceiling exceeded")
                            .with("kind", E::KIND)
                            .with("count", inserted.count)
                            .with("limit", limit),
                    );
                }
            }
        }

        Ok(Subscription::new(Arc::downgrade(&self.shared), kind, id))
    }

    /// Removes `listener` from kind `E`. Returns `false` if it was not registered.
    pub fn unsubscribe<E: Event>(&self, listener: &Listener<E>) -> bool {
        let removed = self
            .shared
            .registry
            .write()
            .remove(KindId::of::<E>().type_id(), listener.id());
        if removed {
            tracing::trace!(target: "eventvisor", kind = E::KIND, "listener unsubscribed");
        }
        removed
    }

    /// Removes every listener of kind `E`, returning how many were removed.
    pub fn unsubscribe_all<E: Event>(&self) -> usize {
        let removed = self
            .shared
            .registry
            .write()
            .remove_kind(KindId::of::<E>().type_id());
        tracing::trace!(target: "eventvisor", kind = E::KIND, removed, "kind unsubscribed");
        removed
    }

    /// Removes every listener of every kind and resets telemetry.
    pub fn clear(&self) {
        self.shared.registry.write().clear();
        self.shared.telemetry.reset();
        tracing::trace!(target: "eventvisor", "bus cleared");
    }

    /// Live listeners registered for kind `E` (0 if none).
    pub fn listener_count<E: Event>(&self) -> usize {
        self.shared.registry.read().count::<E>()
    }

    /// True if kind `E` has at least one live listener.
    pub fn has_listeners<E: Event>(&self) -> bool {
        self.listener_count::<E>() > 0
    }

    /// True if `listener` is currently registered for kind `E`.
    pub fn is_subscribed<E: Event>(&self, listener: &Listener<E>) -> bool {
        self.shared
            .registry
            .read()
            .contains(KindId::of::<E>().type_id(), listener.id())
    }

    /// Kinds with at least one live listener, sorted by name.
    ///
    /// Each call takes a fresh snapshot.
    pub fn known_kinds(&self) -> Vec<KindId> {
        self.shared.registry.read().kinds()
    }

    // ---- Dispatch engine ----

    /// Publishes `event` to every current listener of its kind.
    ///
    /// ### Inline mode (default)
    /// Listeners run on the calling thread, in order. With the strict default the
    /// first failure aborts the pass and is returned as [`BusError::ListenerFailure`];
    /// with `continue_on_error` every listener runs, failures are logged and
    /// `Ok(())` is returned.
    ///
    /// ### Scheduled mode
    /// Each listener is spawned on the current tokio runtime and this call returns
    /// right away. Failures never reach the caller.
    ///
    /// ### Errors
    /// - [`BusError::InvalidKind`] / [`BusError::InvalidPayload`] before any work
    /// - [`BusError::NoRuntime`] for scheduled mode outside a tokio runtime
    /// - [`BusError::ListenerFailure`] for strict inline passes
    pub fn publish<E: Event>(&self, event: E, opts: PublishOptions) -> Result<(), BusError> {
        KindId::of::<E>().validate()?;
        event
            .validate()
            .map_err(|reason| BusError::InvalidPayload {
                kind: E::KIND,
                reason,
            })?;

        let runtime = match opts.mode {
            DispatchMode::Inline => None,
            DispatchMode::Scheduled => Some(
                tokio::runtime::Handle::try_current()
                    .map_err(|_| BusError::NoRuntime { kind: E::KIND })?,
            ),
        };

        let snapshot = self.shared.registry.write().snapshot::<E>();
        if snapshot.is_empty() {
            tracing::trace!(target: "eventvisor", kind = E::KIND, "published with no listeners");
            return Ok(());
        }

        match runtime {
            None => dispatch::run_inline(&self.shared, &event, snapshot, opts.continue_on_error),
            Some(handle) => {
                dispatch::schedule(&self.shared, &handle, event, snapshot);
                Ok(())
            }
        }
    }

    /// Shorthand for `publish(event, PublishOptions::default())`.
    pub fn emit<E: Event>(&self, event: E) -> Result<(), BusError> {
        self.publish(event, PublishOptions::default())
    }

    // ---- Telemetry ----

    /// Performance record of kind `E`, if it was ever dispatched.
    pub fn perf<E: Event>(&self) -> Option<PerfRecord> {
        self.shared.telemetry.get_kind::<E>()
    }

    /// Writes one `Info` record per dispatched kind to the logging collaborator.
    pub fn log_summary(&self) {
        for (kind, rec) in self.shared.telemetry.summary() {
            self.shared.logger.log(
                LogRecord::info("dispatch summary")
                    .with("kind", kind)
                    .with("count", rec.count)
                    .with("avg_us", rec.average.as_micros())
                    .with("min_us", rec.min.as_micros())
                    .with("max_us", rec.max.as_micros())
                    .with("last_listeners", rec.listener_count)
                    .with("last_errors", rec.error_count)
                    .with("total_errors", rec.total_errors),
            );
        }
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus")
            .field("config", &self.shared.cfg)
            .field("kinds", &self.known_kinds())
            .field("logger", &self.shared.logger.name())
            .finish()
    }
}
