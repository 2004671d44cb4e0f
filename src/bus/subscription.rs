//! # Unsubscribe handle.

use std::sync::Weak;

use super::bus::Shared;
use crate::events::KindId;

/// Handle returned by every `subscribe*` call.
///
/// Dropping the handle does **not** unsubscribe; call [`Subscription::unsubscribe`].
/// The handle does not keep the bus alive.
#[derive(Debug, Clone)]
pub struct Subscription {
    bus: Weak<Shared>,
    kind: KindId,
    id: u64,
}

impl Subscription {
    pub(crate) fn new(bus: Weak<Shared>, kind: KindId, id: u64) -> Self {
        Self { bus, kind, id }
    }

    /// Kind this subscription belongs to.
    #[inline]
    pub fn kind(&self) -> KindId {
        self.kind
    }

    /// True while the entry is still registered on a live bus.
    pub fn is_active(&self) -> bool {
        self.bus
            .upgrade()
            .is_some_and(|bus| bus.registry.read().contains(self.kind.type_id(), self.id))
    }

    /// Removes the entry. Returns `false` if it was already gone.
    pub fn unsubscribe(self) -> bool {
        let Some(bus) = self.bus.upgrade() else {
            return false;
        };
        let removed = bus.registry.write().remove(self.kind.type_id(), self.id);
        if removed {
            tracing::trace!(target: "eventvisor", kind = self.kind.name(), "listener unsubscribed");
        }
        removed
    }
}
