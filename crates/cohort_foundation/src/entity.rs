//! Entity identifiers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque entity identifier.
///
/// Ids are handed out by a world in strictly increasing order and are never
/// reassigned, even when the storage record behind an entity is recycled.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an entity id from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns a sentinel value representing "no entity".
    ///
    /// This uses `u64::MAX`, which is never allocated.
    #[must_use]
    pub const fn null() -> Self {
        Self(u64::MAX)
    }

    /// Returns true if this is the null sentinel value.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }

    /// Returns the id that follows this one.
    #[must_use]
    pub(crate) const fn successor(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self(0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "EntityId(null)")
        } else {
            write!(f, "EntityId({})", self.0)
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "Entity(null)")
        } else {
            write!(f, "Entity({})", self.0)
        }
    }
}

/// Monotonic source of [`EntityId`]s.
///
/// Each world owns one allocator; ids are never returned to it.
#[derive(Debug, Clone, Default)]
pub struct EntityIdAllocator {
    next: EntityId,
}

impl EntityIdAllocator {
    /// Creates an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next id.
    pub fn allocate(&mut self) -> EntityId {
        let id = self.next;
        self.next = id.successor();
        id
    }

    /// Returns the number of ids allocated so far.
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.next.raw()
    }
}
