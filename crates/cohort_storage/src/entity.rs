//! Entity records and their recycling pool.
//!
//! The `EntityStore` owns one record per entity slot. A record carries the
//! entity's component values and its position in archetype storage. When an
//! entity is destroyed its record goes onto a free list and is reused by the
//! next spawn, but under a fresh [`EntityId`]: ids are never reassigned.

// Allow usize to u32 casts - record counts stay far below u32::MAX
#![allow(clippy::cast_possible_truncation)]

use std::any::Any;
use std::fmt;

use cohort_foundation::{ComponentIndex, EntityId, EntityIdAllocator, Error, Result, Signature};
use log::trace;

use crate::archetype::ArchetypeId;

/// Handle to an entity in a [`World`](crate::World).
///
/// Handles are cheap to copy. A handle outlives its entity: once the entity
/// is destroyed every operation through the handle fails with a stale entity
/// error, even after the underlying record has been reused.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Entity {
    id: EntityId,
    record: u32,
}

impl Entity {
    /// Returns the entity's unique id.
    #[must_use]
    pub const fn id(self) -> EntityId {
        self.id
    }

    pub(crate) const fn record(self) -> usize {
        self.record as usize
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}@{})", self.id.raw(), self.record)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Where an entity lives in archetype storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EntityLocation {
    /// The archetype holding the entity.
    pub archetype: ArchetypeId,
    /// Row in the archetype's dense entity array.
    pub row: usize,
}

/// Boxed component value held in a record slot.
pub(crate) type ComponentBox = Box<dyn Any>;

#[derive(Default)]
struct EntityRecord {
    id: EntityId,
    alive: bool,
    location: Option<EntityLocation>,
    /// Component values indexed by `ComponentIndex`.
    slots: Vec<Option<ComponentBox>>,
}

impl EntityRecord {
    fn signature(&self) -> Signature {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| ComponentIndex::new(i as u8))
            .collect()
    }
}

/// Manages entity records, id allocation, and the record pool.
///
/// Only the owning world places, moves, or releases entities; outside code
/// can read a store but not create records that sit in no archetype:
///
/// ```compile_fail
/// use cohort_storage::{ArchetypeId, EntityLocation, EntityStore};
///
/// let mut store = EntityStore::new();
/// store.spawn(EntityLocation { archetype: ArchetypeId::EMPTY, row: 0 });
/// ```
#[derive(Default)]
pub struct EntityStore {
    records: Vec<EntityRecord>,
    /// Records of destroyed entities awaiting reuse.
    free_list: Vec<u32>,
    ids: EntityIdAllocator,
    live_count: usize,
}

impl fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("records", &self.records.len())
            .field("pooled", &self.free_list.len())
            .field("live", &self.live_count)
            .finish()
    }
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Allocates a live entity placed at `location`.
    ///
    /// Reuses a pooled record when one is available; the id is always new.
    pub(crate) fn spawn(&mut self, location: EntityLocation) -> Entity {
        let id = self.ids.allocate();
        self.live_count += 1;

        let record = if let Some(record) = self.free_list.pop() {
            trace!("reusing record {record} for {id}");
            record
        } else {
            self.records.push(EntityRecord::default());
            (self.records.len() - 1) as u32
        };

        let slot = &mut self.records[record as usize];
        slot.id = id;
        slot.alive = true;
        slot.location = Some(location);

        Entity { id, record }
    }

    /// Destroys an entity, dropping its components and pooling its record.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is stale.
    pub(crate) fn release(&mut self, entity: Entity) -> Result<()> {
        let record = self.record_mut(entity)?;
        record.alive = false;
        record.location = None;
        for slot in &mut record.slots {
            *slot = None;
        }
        self.free_list.push(entity.record);
        self.live_count -= 1;
        Ok(())
    }

    /// Checks if a handle refers to a live entity.
    #[must_use]
    pub fn exists(&self, entity: Entity) -> bool {
        self.record(entity).is_ok()
    }

    /// Validates that a handle refers to a live entity.
    ///
    /// # Errors
    ///
    /// Returns a stale entity error if the entity was destroyed.
    pub fn validate(&self, entity: Entity) -> Result<()> {
        self.record(entity).map(|_| ())
    }

    /// Returns where a live entity is stored.
    ///
    /// # Errors
    ///
    /// Returns a stale entity error if the entity was destroyed.
    pub fn location(&self, entity: Entity) -> Result<EntityLocation> {
        self.record(entity)?
            .location
            .ok_or_else(|| Error::internal(format!("live entity {} has no location", entity.id)))
    }

    /// Updates where a live entity is stored.
    ///
    /// # Errors
    ///
    /// Returns a stale entity error if the entity was destroyed.
    pub(crate) fn set_location(&mut self, entity: Entity, location: EntityLocation) -> Result<()> {
        self.record_mut(entity)?.location = Some(location);
        Ok(())
    }

    /// Updates only the row of a live entity, after a swap-remove moved it.
    ///
    /// # Errors
    ///
    /// Returns a stale entity error if the entity was destroyed.
    pub(crate) fn set_row(&mut self, entity: Entity, row: usize) -> Result<()> {
        let record = self.record_mut(entity)?;
        match record.location.as_mut() {
            Some(location) => {
                location.row = row;
                Ok(())
            }
            None => Err(Error::internal(format!(
                "live entity {} has no location",
                entity.id
            ))),
        }
    }

    /// Returns the component value in `component`'s slot.
    ///
    /// Returns `None` for stale handles and empty slots.
    #[must_use]
    pub(crate) fn slot(&self, entity: Entity, component: ComponentIndex) -> Option<&ComponentBox> {
        self.record(entity)
            .ok()?
            .slots
            .get(component.index())?
            .as_ref()
    }

    /// Mutable variant of [`slot`](Self::slot).
    pub(crate) fn slot_mut(
        &mut self,
        entity: Entity,
        component: ComponentIndex,
    ) -> Option<&mut ComponentBox> {
        self.record_mut(entity)
            .ok()?
            .slots
            .get_mut(component.index())?
            .as_mut()
    }

    /// Stores a value in `component`'s slot, growing the slot array as needed.
    pub(crate) fn put(
        &mut self,
        entity: Entity,
        component: ComponentIndex,
        value: ComponentBox,
    ) -> Result<()> {
        let slots = &mut self.record_mut(entity)?.slots;
        if slots.len() <= component.index() {
            slots.resize_with(component.index() + 1, || None);
        }
        slots[component.index()] = Some(value);
        Ok(())
    }

    /// Removes and returns the value in `component`'s slot.
    pub(crate) fn take(
        &mut self,
        entity: Entity,
        component: ComponentIndex,
    ) -> Result<Option<ComponentBox>> {
        let slots = &mut self.record_mut(entity)?.slots;
        Ok(slots.get_mut(component.index()).and_then(Option::take))
    }

    /// Computes the signature implied by a live entity's occupied slots.
    ///
    /// # Errors
    ///
    /// Returns a stale entity error if the entity was destroyed.
    pub fn slot_signature(&self, entity: Entity) -> Result<Signature> {
        Ok(self.record(entity)?.signature())
    }

    /// Iterates over all live entities in record order.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.alive)
            .map(|(i, record)| Entity {
                id: record.id,
                record: i as u32,
            })
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Returns the number of pooled records awaiting reuse.
    #[must_use]
    pub fn pooled(&self) -> usize {
        self.free_list.len()
    }

    /// Returns the number of ids handed out so far.
    #[must_use]
    pub fn ids_allocated(&self) -> u64 {
        self.ids.allocated()
    }

    fn record(&self, entity: Entity) -> Result<&EntityRecord> {
        match self.records.get(entity.record()) {
            Some(record) if record.alive && record.id == entity.id => Ok(record),
            _ => Err(Error::stale_entity(entity.id)),
        }
    }

    fn record_mut(&mut self, entity: Entity) -> Result<&mut EntityRecord> {
        match self.records.get_mut(entity.record()) {
            Some(record) if record.alive && record.id == entity.id => Ok(record),
            _ => Err(Error::stale_entity(entity.id)),
        }
    }
}
