//! The world: entities, archetypes, and cached filters in one place.
//!
//! A `World` keeps every entity in the archetype matching its exact set of
//! components. Adding or removing a component is a move between archetypes:
//! the entity is swap-removed from its old archetype and appended to the one
//! for its new signature, which is created on demand.
//!
//! Worlds are single-owner: mutation takes `&mut World` and a [`Query`]
//! borrows the world, so membership cannot change during iteration.
//! Component reads during iteration go through the query.

use std::any::type_name;
use std::borrow::Cow;

use cohort_foundation::{
    Component, ComponentIndex, EntityId, Error, ErrorContext, Result, Signature,
    component_index, registered_component,
};
use log::trace;

use crate::archetype::ArchetypeId;
use crate::bundle::Bundle;
use crate::config::WorldConfig;
use crate::entity::{ComponentBox, Entity, EntityLocation, EntityStore};
use crate::filter::{self, FilterCache, FilterSpec, Query};
use crate::index::ArchetypeIndex;

/// In-memory entity store organized by archetype.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    entities: EntityStore,
    archetypes: ArchetypeIndex,
    filters: FilterCache,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates an empty world with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    /// Creates an empty world.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            entities: EntityStore::with_capacity(config.entity_capacity),
            archetypes: ArchetypeIndex::with_capacity(config.archetype_capacity),
            filters: FilterCache::new(),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    // =========================================================================
    // Entity Lifecycle
    // =========================================================================

    /// Spawns an entity with no components.
    pub fn spawn(&mut self) -> Entity {
        let archetype = self.archetypes.empty();
        let location = EntityLocation {
            archetype: archetype.id(),
            row: archetype.len(),
        };
        let entity = self.entities.spawn(location);
        self.archetypes[location.archetype].push(entity);
        entity
    }

    /// Spawns an entity holding every component in `bundle`.
    ///
    /// The entity goes straight into the archetype for the bundle's
    /// signature; no intermediate archetypes are created.
    ///
    /// # Errors
    ///
    /// Returns a duplicate component error, and spawns nothing, if the
    /// bundle holds the same component type twice.
    pub fn spawn_with<B: Bundle>(&mut self, bundle: B) -> Result<Entity> {
        let components = bundle.into_components();

        let mut signature = Signature::new();
        for component in &components {
            if !signature.insert(component.index) {
                return Err(Error::duplicate_component(EntityId::null(), component.name)
                    .with_context(ErrorContext::new().with_operation("spawn_with")));
            }
        }

        let id = self.archetypes.find_or_create(&signature);
        let location = EntityLocation {
            archetype: id,
            row: self.archetypes[id].len(),
        };
        let entity = self.entities.spawn(location);
        self.archetypes[id].push(entity);
        for component in components {
            self.entities.put(entity, component.index, component.value)?;
        }
        Ok(entity)
    }

    /// Destroys an entity.
    ///
    /// Its record is pooled for reuse by a later spawn; its id is retired.
    ///
    /// # Errors
    ///
    /// Returns a stale entity error if the entity was already destroyed.
    pub fn destroy(&mut self, entity: Entity) -> Result<()> {
        let location = self.entities.location(entity)?;
        let archetype = self
            .archetypes
            .get_mut(location.archetype)
            .ok_or_else(|| Error::internal(format!("missing archetype {}", location.archetype)))?;
        if let Some(moved) = archetype.swap_remove(location.row) {
            self.entities.set_row(moved, location.row)?;
        }
        self.entities.release(entity)
    }

    /// Checks if an entity is alive.
    #[must_use]
    pub fn exists(&self, entity: Entity) -> bool {
        self.entities.exists(entity)
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns the number of destroyed entity records awaiting reuse.
    #[must_use]
    pub fn pooled_entities(&self) -> usize {
        self.entities.pooled()
    }

    /// Iterates over all live entities.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter()
    }

    // =========================================================================
    // Component Operations
    // =========================================================================

    /// Attaches a component, moving the entity to its new archetype.
    ///
    /// # Errors
    ///
    /// Returns a duplicate component error if the entity already has a `T`,
    /// or a stale entity error. The entity is unchanged on error.
    pub fn add<T: Component>(&mut self, entity: Entity, value: T) -> Result<()> {
        let component = component_index::<T>();
        let location = self.entities.location(entity)?;
        let signature = self.archetypes[location.archetype].signature();

        if signature.contains(component) {
            return Err(Error::duplicate_component(entity.id(), type_name::<T>())
                .with_context(
                    ErrorContext::new()
                        .with_operation("add")
                        .with_signature(signature.to_string()),
                ));
        }

        let target = signature.with(component);
        self.relocate(entity, location, &target)?;
        self.entities.put(entity, component, Box::new(value))
    }

    /// Detaches a component and returns it, moving the entity to its new
    /// archetype.
    ///
    /// # Errors
    ///
    /// Returns a missing component error if the entity has no `T`, or a
    /// stale entity error. The entity is unchanged on error.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Result<T> {
        let location = self.entities.location(entity)?;
        let signature = self.archetypes[location.archetype].signature();

        let Some(component) = registered_component::<T>().filter(|&c| signature.contains(c))
        else {
            return Err(Error::missing_component(entity.id(), type_name::<T>())
                .with_context(
                    ErrorContext::new()
                        .with_operation("remove")
                        .with_signature(signature.to_string()),
                ));
        };

        let target = signature.without(component);
        let value = self.take_slot::<T>(entity, component)?;
        self.relocate(entity, location, &target)?;
        Ok(value)
    }

    /// Returns a component of an entity.
    ///
    /// Returns `None` if the entity lacks `T` or is no longer alive.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        let component = registered_component::<T>()?;
        self.entities.slot(entity, component)?.downcast_ref()
    }

    /// Returns a component of an entity, mutably.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let component = registered_component::<T>()?;
        self.entities.slot_mut(entity, component)?.downcast_mut()
    }

    /// Returns a component of an entity, failing if it is absent.
    ///
    /// # Errors
    ///
    /// Returns a stale entity error or a missing component error.
    pub fn try_get<T: Component>(&self, entity: Entity) -> Result<&T> {
        self.entities.validate(entity)?;
        self.get::<T>(entity).ok_or_else(|| {
            Error::missing_component(entity.id(), type_name::<T>())
                .with_context(ErrorContext::new().with_operation("get"))
        })
    }

    /// Checks if an entity has a component.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        registered_component::<T>()
            .zip(self.entities.location(entity).ok())
            .is_some_and(|(c, location)| self.archetypes[location.archetype].contains(c))
    }

    /// Returns the world's only `T`, creating it on first use.
    ///
    /// Looks for an entity whose sole component is a `T`. If there is none,
    /// spawns one holding `T::default()`. Repeated calls return the same
    /// instance.
    ///
    /// # Errors
    ///
    /// Only fails if internal bookkeeping is inconsistent.
    pub fn singleton<T: Component + Default>(&mut self) -> Result<&mut T> {
        let signature = Signature::from_components(vec![component_index::<T>()]);
        let existing = self
            .archetypes
            .find(&signature)
            .and_then(|id| self.archetypes[id].entities().first().copied());

        let entity = match existing {
            Some(entity) => entity,
            None => {
                trace!("creating singleton {}", type_name::<T>());
                self.spawn_with((T::default(),))?
            }
        };

        self.get_mut::<T>(entity)
            .ok_or_else(|| Error::missing_component(entity.id(), type_name::<T>()))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the entities matching `spec`.
    ///
    /// Results are cached per distinct spec and refreshed with only the
    /// archetypes created since the previous call. The world keeps its own
    /// copy of `spec`.
    pub fn filter(&mut self, spec: &FilterSpec) -> Query<'_> {
        let archetypes = if self.config.filter_cache {
            Cow::Borrowed(self.filters.get_or_update(spec, &self.archetypes).archetypes())
        } else {
            Cow::Owned(filter::evaluate(spec, &self.archetypes, 0))
        };
        Query::new(&self.archetypes, &self.entities, archetypes)
    }

    /// Counts the entities matching `spec`.
    pub fn filter_count(&mut self, spec: &FilterSpec) -> usize {
        self.filter(spec).count()
    }

    /// Returns the number of cached filter groups.
    #[must_use]
    pub fn cached_filters(&self) -> usize {
        self.filters.len()
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Returns the number of archetypes created so far.
    #[must_use]
    pub fn archetype_count(&self) -> usize {
        self.archetypes.len()
    }

    /// Returns the archetype index, read-only.
    #[must_use]
    pub fn archetypes(&self) -> &ArchetypeIndex {
        &self.archetypes
    }

    /// Returns the archetype an entity lives in.
    ///
    /// # Errors
    ///
    /// Returns a stale entity error if the entity was destroyed.
    pub fn archetype_of(&self, entity: Entity) -> Result<ArchetypeId> {
        Ok(self.entities.location(entity)?.archetype)
    }

    /// Returns the component types an entity holds.
    ///
    /// # Errors
    ///
    /// Returns a stale entity error if the entity was destroyed.
    pub fn signature_of(&self, entity: Entity) -> Result<&Signature> {
        let location = self.entities.location(entity)?;
        Ok(self.archetypes[location.archetype].signature())
    }

    /// Verifies that every live entity sits at its recorded row of the
    /// archetype matching its occupied component slots.
    ///
    /// # Errors
    ///
    /// Returns an internal error describing the first inconsistency.
    pub fn check_consistency(&self) -> Result<()> {
        let mut placed = 0;
        for archetype in self.archetypes.iter() {
            for (row, &entity) in archetype.entities().iter().enumerate() {
                let location = self.entities.location(entity)?;
                if location.archetype != archetype.id() || location.row != row {
                    return Err(Error::internal(format!(
                        "{entity} recorded at {}:{} but stored at {}:{row}",
                        location.archetype,
                        location.row,
                        archetype.id()
                    )));
                }
                let slots = self.entities.slot_signature(entity)?;
                if &slots != archetype.signature() {
                    return Err(Error::internal(format!(
                        "{entity} holds {slots} but lives in archetype {} {}",
                        archetype.id(),
                        archetype.signature()
                    )));
                }
                placed += 1;
            }
        }
        if placed != self.entities.len() {
            return Err(Error::internal(format!(
                "{placed} entities in archetypes but {} alive",
                self.entities.len()
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Moves an entity from `from` to the archetype for `signature`.
    fn relocate(
        &mut self,
        entity: Entity,
        from: EntityLocation,
        signature: &Signature,
    ) -> Result<()> {
        let target = self.archetypes.find_or_create(signature);
        let (source, destination) = self.archetypes.pair_mut(from.archetype, target);

        if let Some(moved) = source.swap_remove(from.row) {
            self.entities.set_row(moved, from.row)?;
        }
        let row = destination.push(entity);
        self.entities.set_location(
            entity,
            EntityLocation {
                archetype: target,
                row,
            },
        )?;

        trace!("moved {entity} from archetype {} to {target}", from.archetype);
        Ok(())
    }

    fn take_slot<T: Component>(&mut self, entity: Entity, component: ComponentIndex) -> Result<T> {
        let value: ComponentBox = self.entities.take(entity, component)?.ok_or_else(|| {
            Error::internal(format!(
                "{entity} is in an archetype with {} but its slot is empty",
                type_name::<T>()
            ))
        })?;
        value.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            Error::internal(format!(
                "slot {component} of {entity} does not hold a {}",
                type_name::<T>()
            ))
        })
    }
}
