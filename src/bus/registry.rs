//! # Subscription registry.
//!
//! Maps each kind to its ordered listener set. Slots are type-erased behind
//! [`AnySlot`] so one map can hold every kind; typed access downcasts back to
//! `Slot<E>`, which cannot fail because slots are keyed by `TypeId::of::<E>()`.
//!
//! ## Architecture
//! ```text
//! HashMap<TypeId, Box<dyn AnySlot>>
//!     └─► Slot<E> { entries: Vec<Entry<E>> }
//!             └─► Entry { id, target: Strong(Arc) | Weak(Weak), priority, once: Option<flag> }
//! ```
//!
//! ## Rules
//! - **Unique**: at most one entry per (kind, listener id)
//! - **Ordered**: priority descending, then insertion order
//! - **No empty slots**: removing the last live entry removes the slot
//! - **Lazy reclamation**: dead weak entries are pruned on the next access to their slot
//! - **Once flags**: a once-entry owns a flag shared with every snapshot that
//!   resolved it; whoever sets it first runs the listener

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Weak};

use crate::events::{Event, KindId};
use crate::listeners::Listen;

/// How an entry holds its listener.
pub(crate) enum Target<E: Event> {
    Strong(Arc<dyn Listen<E>>),
    Weak(Weak<dyn Listen<E>>),
}

impl<E: Event> Target<E> {
    fn upgrade(&self) -> Option<Arc<dyn Listen<E>>> {
        match self {
            Target::Strong(l) => Some(Arc::clone(l)),
            Target::Weak(w) => w.upgrade(),
        }
    }

    fn is_alive(&self) -> bool {
        match self {
            Target::Strong(_) => true,
            Target::Weak(w) => w.strong_count() > 0,
        }
    }
}

struct Entry<E: Event> {
    id: u64,
    target: Target<E>,
    priority: i32,
    once: Option<Arc<AtomicBool>>,
}

/// One listener resolved for a dispatch pass.
pub(crate) struct Resolved<E: Event> {
    pub(crate) id: u64,
    /// Set once the entry has been consumed; `None` for regular entries.
    pub(crate) once: Option<Arc<AtomicBool>>,
    pub(crate) listener: Arc<dyn Listen<E>>,
}

/// Outcome of an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Inserted {
    /// False if the listener was already registered for this kind.
    pub(crate) added: bool,
    /// Live listeners for the kind after the insert.
    pub(crate) count: usize,
}

struct Slot<E: Event> {
    entries: Vec<Entry<E>>,
}

impl<E: Event> Slot<E> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts after every entry with priority >= `entry.priority`.
    fn insert(&mut self, entry: Entry<E>) {
        let pos = self
            .entries
            .iter()
            .position(|e| e.priority < entry.priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
    }
}

/// Type-erased view of a `Slot<E>`.
trait AnySlot: Send + Sync {
    fn kind(&self) -> KindId;
    fn live_len(&self) -> usize;
    fn contains_id(&self, id: u64) -> bool;
    fn remove_id(&mut self, id: u64) -> bool;
    fn remove_once(&mut self, id: u64, flag: &Arc<AtomicBool>) -> bool;
    fn prune(&mut self);
    fn is_empty(&self) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: Event> AnySlot for Slot<E> {
    fn kind(&self) -> KindId {
        KindId::of::<E>()
    }

    fn live_len(&self) -> usize {
        self.entries.iter().filter(|e| e.target.is_alive()).count()
    }

    fn contains_id(&self, id: u64) -> bool {
        self.entries
            .iter()
            .any(|e| e.id == id && e.target.is_alive())
    }

    fn remove_id(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    fn remove_once(&mut self, id: u64, flag: &Arc<AtomicBool>) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| {
            e.id != id || !e.once.as_ref().is_some_and(|f| Arc::ptr_eq(f, flag))
        });
        self.entries.len() != before
    }

    fn prune(&mut self) {
        self.entries.retain(|e| e.target.is_alive());
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Kind → listener set.
#[derive(Default)]
pub(crate) struct Registry {
    slots: HashMap<TypeId, Box<dyn AnySlot>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn slot<E: Event>(&self) -> Option<&Slot<E>> {
        self.slots
            .get(&TypeId::of::<E>())
            .and_then(|s| s.as_any().downcast_ref::<Slot<E>>())
    }

    fn slot_mut<E: Event>(&mut self) -> Option<&mut Slot<E>> {
        self.slots
            .get_mut(&TypeId::of::<E>())
            .and_then(|s| s.as_any_mut().downcast_mut::<Slot<E>>())
    }

    /// Registers a listener; no-op if `id` is already present for the kind.
    pub(crate) fn insert<E: Event>(
        &mut self,
        id: u64,
        target: Target<E>,
        priority: i32,
        once: bool,
    ) -> Inserted {
        let slot = self
            .slots
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Slot::<E>::new()));
        slot.prune();

        let added = match slot.as_any_mut().downcast_mut::<Slot<E>>() {
            Some(typed) if typed.entries.iter().any(|e| e.id == id) => false,
            Some(typed) => {
                typed.insert(Entry {
                    id,
                    target,
                    priority,
                    once: once.then(|| Arc::new(AtomicBool::new(false))),
                });
                true
            }
            None => false,
        };

        let count = slot.live_len();
        if slot.is_empty() {
            self.slots.remove(&TypeId::of::<E>());
        }
        Inserted { added, count }
    }

    /// Removes one entry; drops the slot if it becomes empty.
    pub(crate) fn remove(&mut self, kind: TypeId, id: u64) -> bool {
        let Some(slot) = self.slots.get_mut(&kind) else {
            return false;
        };
        let removed = slot.remove_id(id);
        slot.prune();
        if slot.is_empty() {
            self.slots.remove(&kind);
        }
        removed
    }

    /// Removes the once-entry owning `flag`, if it is still registered.
    ///
    /// An entry re-registered under the same id after the flag was resolved
    /// is left alone.
    pub(crate) fn remove_once(&mut self, kind: TypeId, id: u64, flag: &Arc<AtomicBool>) -> bool {
        let Some(slot) = self.slots.get_mut(&kind) else {
            return false;
        };
        let removed = slot.remove_once(id, flag);
        if slot.is_empty() {
            self.slots.remove(&kind);
        }
        removed
    }

    /// True if `id` is currently registered (and alive) for the kind.
    pub(crate) fn contains(&self, kind: TypeId, id: u64) -> bool {
        self.slots.get(&kind).is_some_and(|s| s.contains_id(id))
    }

    /// Removes every entry of the kind, returning how many there were.
    pub(crate) fn remove_kind(&mut self, kind: TypeId) -> usize {
        self.slots
            .remove(&kind)
            .map(|s| s.live_len())
            .unwrap_or(0)
    }

    /// Removes every kind.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    /// Live listeners for kind `E` (0 if absent).
    pub(crate) fn count<E: Event>(&self) -> usize {
        self.slot::<E>()
            .map(|s| s.live_len())
            .unwrap_or(0)
    }

    /// Kinds holding at least one live listener, sorted by name.
    pub(crate) fn kinds(&self) -> Vec<KindId> {
        let mut kinds: Vec<KindId> = self
            .slots
            .values()
            .filter(|s| s.live_len() > 0)
            .map(|s| s.kind())
            .collect();
        kinds.sort_unstable();
        kinds
    }

    /// Ordered snapshot of the live listeners of kind `E`.
    ///
    /// Prunes dead weak entries (and the slot itself if nothing is left).
    pub(crate) fn snapshot<E: Event>(&mut self) -> Vec<Resolved<E>> {
        let resolved: Vec<Resolved<E>> = match self.slot_mut::<E>() {
            Some(slot) => {
                slot.entries.retain(|e| e.target.is_alive());
                slot.entries
                    .iter()
                    .filter_map(|e| {
                        e.target.upgrade().map(|listener| Resolved {
                            id: e.id,
                            once: e.once.clone(),
                            listener,
                        })
                    })
                    .collect()
            }
            None => return Vec::new(),
        };

        if resolved.is_empty() {
            self.slots.remove(&TypeId::of::<E>());
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::Listener;

    struct Ping;
    impl Event for Ping {
        const KIND: &'static str = "ping";
    }

    struct Pong;
    impl Event for Pong {
        const KIND: &'static str = "pong";
    }

    fn strong(l: &Listener<Ping>) -> Target<Ping> {
        Target::Strong(Arc::clone(l.shared()))
    }

    #[test]
    fn test_duplicate_insert_is_a_no_op() {
        let mut reg = Registry::new();
        let l = Listener::from_fn(|_: &Ping| Ok(()));

        assert_eq!(
            reg.insert(l.id(), strong(&l), 0, false),
            Inserted { added: true, count: 1 }
        );
        assert_eq!(
            reg.insert(l.id(), strong(&l), 5, true),
            Inserted { added: false, count: 1 }
        );
        assert_eq!(reg.count::<Ping>(), 1);
    }

    #[test]
    fn test_priority_then_insertion_order() {
        let mut reg = Registry::new();
        let low = Listener::from_fn(|_: &Ping| Ok(()));
        let first = Listener::from_fn(|_: &Ping| Ok(()));
        let second = Listener::from_fn(|_: &Ping| Ok(()));
        let high = Listener::from_fn(|_: &Ping| Ok(()));

        reg.insert(low.id(), strong(&low), -1, false);
        reg.insert(first.id(), strong(&first), 0, false);
        reg.insert(second.id(), strong(&second), 0, false);
        reg.insert(high.id(), strong(&high), 10, false);

        let order: Vec<u64> = reg.snapshot::<Ping>().iter().map(|r| r.id).collect();
        assert_eq!(order, vec![high.id(), first.id(), second.id(), low.id()]);
    }

    #[test]
    fn test_removing_last_entry_drops_the_kind() {
        let mut reg = Registry::new();
        let l = Listener::from_fn(|_: &Ping| Ok(()));
        reg.insert(l.id(), strong(&l), 0, false);
        assert_eq!(reg.kinds(), vec![KindId::of::<Ping>()]);

        assert!(reg.remove(TypeId::of::<Ping>(), l.id()));
        assert!(!reg.remove(TypeId::of::<Ping>(), l.id()));
        assert!(reg.kinds().is_empty());
        assert!(reg.slots.is_empty());
    }

    #[test]
    fn test_dead_weak_entries_are_pruned() {
        let mut reg = Registry::new();
        let l = Listener::from_fn(|_: &Ping| Ok(()));
        let weak = l.downgrade();
        reg.insert(weak.id(), Target::Weak(weak.weak().clone()), 0, false);
        assert!(reg.contains(TypeId::of::<Ping>(), weak.id()));
        assert_eq!(reg.count::<Ping>(), 1);

        drop(l);
        assert_eq!(reg.count::<Ping>(), 0);
        assert!(reg.kinds().is_empty());
        assert!(reg.snapshot::<Ping>().is_empty());
        assert!(reg.slots.is_empty());
    }

    #[test]
    fn test_remove_once_ignores_a_newer_entry() {
        let mut reg = Registry::new();
        let l = Listener::from_fn(|_: &Ping| Ok(()));
        reg.insert(l.id(), strong(&l), 0, true);
        let stale = reg.snapshot::<Ping>().remove(0);
        let flag = stale.once.clone().expect("once entry carries a flag");

        assert!(reg.remove(TypeId::of::<Ping>(), l.id()));
        reg.insert(l.id(), strong(&l), 0, false);
        assert!(!reg.remove_once(TypeId::of::<Ping>(), l.id(), &flag));
        assert_eq!(reg.count::<Ping>(), 1);

        reg.remove(TypeId::of::<Ping>(), l.id());
        reg.insert(l.id(), strong(&l), 0, true);
        let fresh = reg.snapshot::<Ping>().remove(0);
        let fresh_flag = fresh.once.expect("once entry carries a flag");
        assert!(!Arc::ptr_eq(&flag, &fresh_flag));
        assert!(reg.remove_once(TypeId::of::<Ping>(), l.id(), &fresh_flag));
        assert!(reg.slots.is_empty());
    }

    #[test]
    fn test_kinds_sorted_and_remove_kind() {
        let mut reg = Registry::new();
        let a = Listener::from_fn(|_: &Ping| Ok(()));
        let b = Listener::from_fn(|_: &Pong| Ok(()));
        reg.insert(a.id(), strong(&a), 0, false);
        reg.insert(b.id(), Target::Strong(Arc::clone(b.shared())), 0, false);

        assert_eq!(reg.kinds(), vec![KindId::of::<Ping>(), KindId::of::<Pong>()]);
        assert_eq!(reg.remove_kind(TypeId::of::<Pong>()), 1);
        assert_eq!(reg.remove_kind(TypeId::of::<Pong>()), 0);

        reg.clear();
        assert_eq!(reg.count::<Ping>(), 0);
    }
}
