//! # Core listener trait and identity handles.
//!
//! `Listen<E>` is the extension point for plugging handlers into the bus.
//! [`Listener<E>`] is the handle the registry stores and compares: two handles
//! denote the same listener exactly when they share the same allocation.
//!
//! ## Contract
//! - `on_event` runs on the publisher's thread for inline dispatch and on a
//!   tokio worker for scheduled dispatch.
//! - Returning `Err` or panicking are both reported as a listener failure.
//! - Listeners may call back into the bus (subscribe, unsubscribe, publish)
//!   from `on_event`. `Drop` impls of listeners must not.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use crate::error::ListenerError;
use crate::events::Event;

/// Result of one listener invocation.
pub type ListenerResult = Result<(), ListenerError>;

/// Contract for event listeners of kind `E`.
pub trait Listen<E: Event>: Send + Sync + 'static {
    /// Handle a single event.
    ///
    /// # Parameters
    /// - `event`: reference to the payload (shared with other listeners)
    fn on_event(&self, event: &E) -> ListenerResult;

    /// Human-readable name (for logs and errors).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<E, F> Listen<E> for F
where
    E: Event,
    F: Fn(&E) -> ListenerResult + Send + Sync + 'static,
{
    fn on_event(&self, event: &E) -> ListenerResult {
        self(event)
    }
}

/// Source of listener ids; never reused within a process.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Closure listener with an explicit name.
struct Named<F> {
    name: &'static str,
    f: F,
}

impl<E, F> Listen<E> for Named<F>
where
    E: Event,
    F: Fn(&E) -> ListenerResult + Send + Sync + 'static,
{
    fn on_event(&self, event: &E) -> ListenerResult {
        (self.f)(event)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Shared handle to a listener.
///
/// ### Properties
/// - **Identity**: clones compare equal; independently created handles never do.
///   Each handle carries an id assigned at construction, so an id is never
///   shared with a later listener even after this one is dropped.
/// - **Cheap to clone**: internally an `Arc`.
pub struct Listener<E: Event> {
    inner: Arc<dyn Listen<E>>,
    id: u64,
}

impl<E: Event> Listener<E> {
    /// Wraps a listener implementation.
    pub fn new(listener: impl Listen<E>) -> Self {
        Self {
            inner: Arc::new(listener),
            id: next_id(),
        }
    }

    /// Wraps a closure.
    ///
    /// Prefer this over [`Listener::new`] for closures: the explicit `Fn(&E)`
    /// bound lets the compiler infer the argument type.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&E) -> ListenerResult + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(f),
            id: next_id(),
        }
    }

    /// Wraps a closure under the given name.
    pub fn named<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&E) -> ListenerResult + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Named { name, f }),
            id: next_id(),
        }
    }

    /// Listener name (see [`Listen::name`]).
    #[inline]
    pub fn name(&self) -> &'static str {
        self.inner.name()
    }

    /// Creates a weak handle that does not keep the listener alive.
    pub fn downgrade(&self) -> WeakListener<E> {
        WeakListener {
            inner: Arc::downgrade(&self.inner),
            id: self.id(),
        }
    }

    /// True if both handles denote the same listener.
    #[inline]
    pub fn same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub(crate) fn shared(&self) -> &Arc<dyn Listen<E>> {
        &self.inner
    }
}

impl<E: Event> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            id: self.id,
        }
    }
}

impl<E: Event> PartialEq for Listener<E> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<E: Event> Eq for Listener<E> {}

impl<E: Event> fmt::Debug for Listener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("kind", &E::KIND)
            .field("name", &self.name())
            .finish()
    }
}

/// Weak handle to a listener.
///
/// Keeps the identity of the listener it was created from, but not the listener itself.
pub struct WeakListener<E: Event> {
    inner: Weak<dyn Listen<E>>,
    id: u64,
}

impl<E: Event> WeakListener<E> {
    /// Returns a strong handle if the listener is still alive.
    pub fn upgrade(&self) -> Option<Listener<E>> {
        self.inner.upgrade().map(|inner| Listener { inner, id: self.id })
    }

    /// True while at least one strong [`Listener`] handle exists.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub(crate) fn weak(&self) -> &Weak<dyn Listen<E>> {
        &self.inner
    }
}

impl<E: Event> Clone for WeakListener<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
            id: self.id,
        }
    }
}

impl<E: Event> fmt::Debug for WeakListener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakListener")
            .field("kind", &E::KIND)
            .field("alive", &self.is_alive())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;
    impl Event for Ping {
        const KIND: &'static str = "ping";
    }

    struct Loud;
    impl Listen<Ping> for Loud {
        fn on_event(&self, _ev: &Ping) -> ListenerResult {
            Err(ListenerError::fail("too loud"))
        }
        fn name(&self) -> &'static str {
            "loud"
        }
    }

    #[test]
    fn test_clones_share_identity() {
        let a = Listener::from_fn(|_: &Ping| Ok(()));
        let b = a.clone();
        let c = Listener::from_fn(|_: &Ping| Ok(()));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_struct_listener_and_name() {
        let l = Listener::new(Loud);
        assert_eq!(l.name(), "loud");
        assert_eq!(
            l.shared().on_event(&Ping),
            Err(ListenerError::fail("too loud"))
        );

        let named = Listener::named("quiet", |_: &Ping| Ok(()));
        assert_eq!(named.name(), "quiet");
    }

    #[test]
    fn test_ids_are_never_reused() {
        let first = Listener::from_fn(|_: &Ping| Ok(()));
        let first_id = first.id();
        drop(first);

        for _ in 0..64 {
            let next = Listener::from_fn(|_: &Ping| Ok(()));
            assert_ne!(next.id(), first_id);
        }
    }

    #[test]
    fn test_weak_handle_tracks_liveness() {
        let strong = Listener::from_fn(|_: &Ping| Ok(()));
        let weak = strong.downgrade();
        assert!(weak.is_alive());
        assert_eq!(weak.id(), strong.id());
        assert!(weak.upgrade().is_some_and(|l| l == strong));

        drop(strong);
        assert!(!weak.is_alive());
        assert!(weak.upgrade().is_none());
    }
}
