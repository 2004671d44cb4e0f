//! # Runtime kind identifiers.
//!
//! [`KindId`] names a kind at runtime. It pairs the kind's [`TypeId`] (identity)
//! with its declared name (for humans), so two kinds that happen to share a
//! name stay distinct.

use std::any::TypeId;
use std::fmt;

use super::Event;

/// Comparable, hashable identifier of an event kind.
///
/// Ordering is by name first, which gives stable, readable listings
/// (see [`Bus::known_kinds`](crate::Bus::known_kinds)).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindId {
    name: &'static str,
    type_id: TypeId,
}

impl KindId {
    /// Returns the identifier of kind `E`.
    #[inline]
    pub fn of<E: Event>() -> Self {
        Self {
            name: E::KIND,
            type_id: TypeId::of::<E>(),
        }
    }

    /// Declared kind name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True if this identifier denotes kind `E`.
    #[inline]
    pub fn is<E: Event>(&self) -> bool {
        self.type_id == TypeId::of::<E>()
    }

    #[inline]
    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rejects names that are empty once trimmed.
    pub(crate) fn validate(&self) -> Result<(), crate::BusError> {
        if self.name.trim().is_empty() {
            return Err(crate::BusError::InvalidKind { kind: self.name });
        }
        Ok(())
    }
}

impl fmt::Display for KindId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
