//! Archetypes: dense storage for entities sharing one exact signature.

use std::fmt;

use cohort_foundation::{ComponentIndex, Signature};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Creation id of an archetype.
///
/// Ids are assigned in creation order starting at zero, so comparing ids
/// compares creation times. Id 0 is always the empty archetype.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArchetypeId(u32);

impl ArchetypeId {
    /// The archetype with no components.
    pub const EMPTY: ArchetypeId = ArchetypeId(0);

    /// Creates an id from a position in creation order.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32`.
    #[must_use]
    pub fn new(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(raw) => Self(raw),
            Err(_) => panic!("archetype id {index} exceeds u32::MAX"),
        }
    }

    /// Returns the position in creation order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ArchetypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArchetypeId({})", self.0)
    }
}

impl fmt::Display for ArchetypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// All entities holding exactly one set of component types.
///
/// The entity array has no gaps and no stable order: removal swaps the last
/// entity into the freed row. The archetype does not know where entities
/// record their rows, so whoever removes an entity must fix up the row of
/// the entity returned by [`swap_remove`](Self::swap_remove).
#[derive(Debug)]
pub struct Archetype {
    id: ArchetypeId,
    signature: Signature,
    entities: Vec<Entity>,
}

impl Archetype {
    pub(crate) fn new(id: ArchetypeId, signature: Signature) -> Self {
        Self {
            id,
            signature,
            entities: Vec::new(),
        }
    }

    /// Returns the creation id.
    #[must_use]
    pub fn id(&self) -> ArchetypeId {
        self.id
    }

    /// Returns the component types every entity here holds.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Checks if the signature includes a component type.
    #[must_use]
    pub fn contains(&self, component: ComponentIndex) -> bool {
        self.signature.contains(component)
    }

    /// Appends an entity and returns its row.
    pub(crate) fn push(&mut self, entity: Entity) -> usize {
        self.entities.push(entity);
        self.entities.len() - 1
    }

    /// Removes the entity at `row` by moving the last entity into its place.
    ///
    /// Returns the entity now occupying `row`, or `None` if the removed
    /// entity was the last one.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub(crate) fn swap_remove(&mut self, row: usize) -> Option<Entity> {
        self.entities.swap_remove(row);
        self.entities.get(row).copied()
    }

    /// Returns the live entities for read-only iteration.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no entity holds this signature.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
