//! Signature-keyed archetype index.
//!
//! The [`ArchetypeIndex`] owns every archetype of a world. It maps each
//! signature to its unique archetype and keeps, per component type, the
//! creation-ordered list of archetypes containing that type. Because ids are
//! assigned in creation order and archetypes are never removed, those lists
//! are sorted, and "archetypes containing T created at or after id N" is a
//! binary search followed by a slice.

use std::collections::HashMap;
use std::ops::{Index, IndexMut};

use cohort_foundation::{ComponentIndex, Signature};
use log::debug;

use crate::archetype::{Archetype, ArchetypeId};

/// All archetypes of a world plus the indices used to find them.
#[derive(Debug)]
pub struct ArchetypeIndex {
    archetypes: Vec<Archetype>,
    /// Find the archetype id by exact signature.
    by_signature: HashMap<Signature, ArchetypeId>,
    /// Creation-ordered archetypes containing each component, by component index.
    by_component: Vec<Vec<ArchetypeId>>,
}

impl Default for ArchetypeIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchetypeIndex {
    /// Creates an index holding only the empty archetype.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an index with room for `capacity` archetypes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut index = Self {
            archetypes: Vec::with_capacity(capacity.max(1)),
            by_signature: HashMap::with_capacity(capacity),
            by_component: Vec::new(),
        };
        index.find_or_create(&Signature::new());
        index
    }

    /// Returns the archetype for `signature`, creating it if needed.
    ///
    /// A new archetype gets the next creation id and is registered under
    /// every component in its signature. Creating one advances
    /// [`len`](Self::len), which cached filters use as their version.
    pub fn find_or_create(&mut self, signature: &Signature) -> ArchetypeId {
        if let Some(&id) = self.by_signature.get(signature) {
            return id;
        }

        let id = ArchetypeId::new(self.archetypes.len());
        for component in signature.iter() {
            if self.by_component.len() <= component.index() {
                self.by_component
                    .resize_with(component.index() + 1, Vec::new);
            }
            self.by_component[component.index()].push(id);
        }
        self.archetypes.push(Archetype::new(id, signature.clone()));
        self.by_signature.insert(signature.clone(), id);

        debug!("created archetype {id} with signature {signature}");
        id
    }

    /// Returns the archetype for `signature` if it exists.
    #[must_use]
    pub fn find(&self, signature: &Signature) -> Option<ArchetypeId> {
        self.by_signature.get(signature).copied()
    }

    /// Returns archetypes containing `component` with creation id `>= since`.
    ///
    /// The slice is in creation order.
    #[must_use]
    pub fn containing(&self, component: ComponentIndex, since: usize) -> &[ArchetypeId] {
        let list = self
            .by_component
            .get(component.index())
            .map_or(&[][..], Vec::as_slice);
        let start = list.partition_point(|id| id.index() < since);
        &list[start..]
    }

    /// Returns every archetype id `>= since`, in creation order.
    pub fn all_since(&self, since: usize) -> impl Iterator<Item = ArchetypeId> + use<> {
        (since..self.archetypes.len()).map(ArchetypeId::new)
    }

    /// Returns an archetype by id.
    #[must_use]
    pub fn get(&self, id: ArchetypeId) -> Option<&Archetype> {
        self.archetypes.get(id.index())
    }

    /// Returns an archetype by id, mutably.
    pub(crate) fn get_mut(&mut self, id: ArchetypeId) -> Option<&mut Archetype> {
        self.archetypes.get_mut(id.index())
    }

    /// Returns two distinct archetypes mutably.
    ///
    /// # Panics
    ///
    /// Panics if `a` and `b` are equal or out of bounds.
    pub(crate) fn pair_mut(
        &mut self,
        a: ArchetypeId,
        b: ArchetypeId,
    ) -> (&mut Archetype, &mut Archetype) {
        assert_ne!(a, b, "pair_mut needs two distinct archetypes");
        if a.index() > b.index() {
            let (low, high) = self.archetypes.split_at_mut(a.index());
            (&mut high[0], &mut low[b.index()])
        } else {
            let (low, high) = self.archetypes.split_at_mut(b.index());
            (&mut low[a.index()], &mut high[0])
        }
    }

    /// Returns the number of archetypes ever created.
    ///
    /// This is also the id the next archetype will get.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    /// Iterates over all archetypes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Archetype> {
        self.archetypes.iter()
    }

    /// Returns the empty archetype.
    #[must_use]
    pub fn empty(&self) -> &Archetype {
        &self.archetypes[ArchetypeId::EMPTY.index()]
    }
}

impl Index<ArchetypeId> for ArchetypeIndex {
    type Output = Archetype;

    fn index(&self, id: ArchetypeId) -> &Archetype {
        &self.archetypes[id.index()]
    }
}

impl IndexMut<ArchetypeId> for ArchetypeIndex {
    fn index_mut(&mut self, id: ArchetypeId) -> &mut Archetype {
        &mut self.archetypes[id.index()]
    }
}
