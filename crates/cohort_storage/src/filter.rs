//! Archetype filters and their incremental cache.
//!
//! A [`FilterSpec`] is an All/Any/None predicate over component types. It is
//! evaluated against the inverted index of an [`ArchetypeIndex`] rather than
//! by scanning archetypes, and the result is cached per distinct spec in a
//! [`FilterGroup`].
//!
//! # Versioning
//!
//! Archetypes are only ever added, and their ids follow creation order. A
//! group records the archetype count it was computed against (its
//! *version*); its result is exact for every archetype below that id. When
//! the world has created more archetypes since, only the new id range is
//! evaluated and appended. No dirty flags are involved.

use std::borrow::Cow;
use std::collections::HashMap;

use cohort_foundation::{
    Component, ComponentIndex, Signature, component_index, registered_component,
};
use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::archetype::ArchetypeId;
use crate::entity::{Entity, EntityStore};
use crate::index::ArchetypeIndex;

// =============================================================================
// Filter Specification
// =============================================================================

/// An All/Any/None predicate over component types.
///
/// Each clause is a [`Signature`], so the order in which types are added and
/// any repeats have no effect on equality, hashing or results. Empty All or
/// Any clauses do not constrain anything.
///
/// ```
/// use cohort_storage::FilterSpec;
///
/// struct Position;
/// struct Velocity;
/// struct Frozen;
///
/// let moving = FilterSpec::new().all::<Position>().all::<Velocity>().none::<Frozen>();
/// assert_eq!(moving.all_components().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterSpec {
    all: Signature,
    any: Signature,
    none: Signature,
}

impl FilterSpec {
    /// Creates a filter matching every archetype.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires component `T`.
    #[must_use]
    pub fn all<T: Component>(mut self) -> Self {
        self.all.insert(component_index::<T>());
        self
    }

    /// Requires at least one of the `any` components, `T` included.
    #[must_use]
    pub fn any<T: Component>(mut self) -> Self {
        self.any.insert(component_index::<T>());
        self
    }

    /// Excludes component `T`.
    #[must_use]
    pub fn none<T: Component>(mut self) -> Self {
        self.none.insert(component_index::<T>());
        self
    }

    /// Requires every listed component.
    #[must_use]
    pub fn all_of(mut self, components: impl IntoIterator<Item = ComponentIndex>) -> Self {
        self.all.extend(components);
        self
    }

    /// Requires at least one listed component.
    #[must_use]
    pub fn any_of(mut self, components: impl IntoIterator<Item = ComponentIndex>) -> Self {
        self.any.extend(components);
        self
    }

    /// Excludes every listed component.
    #[must_use]
    pub fn none_of(mut self, components: impl IntoIterator<Item = ComponentIndex>) -> Self {
        self.none.extend(components);
        self
    }

    /// Returns the All clause.
    #[must_use]
    pub fn all_components(&self) -> &Signature {
        &self.all
    }

    /// Returns the Any clause.
    #[must_use]
    pub fn any_components(&self) -> &Signature {
        &self.any
    }

    /// Returns the None clause.
    #[must_use]
    pub fn none_components(&self) -> &Signature {
        &self.none
    }

    /// Tests one signature directly, without any index.
    #[must_use]
    pub fn matches(&self, signature: &Signature) -> bool {
        signature.contains_all(&self.all)
            && (self.any.is_empty() || signature.intersects(&self.any))
            && !signature.intersects(&self.none)
    }
}

// =============================================================================
// Evaluation
// =============================================================================

/// Evaluates `spec` over archetypes with creation id `>= start`.
///
/// The result is sorted by archetype id.
#[must_use]
pub fn evaluate(spec: &FilterSpec, index: &ArchetypeIndex, start: usize) -> Vec<ArchetypeId> {
    let all = (!spec.all.is_empty()).then(|| intersect_all(&spec.all, index, start));
    let any = (!spec.any.is_empty()).then(|| union_any(&spec.any, index, start));

    let mut matched = match (all, any) {
        (Some(mut all), Some(any)) => {
            all.retain(|id| any.binary_search(id).is_ok());
            all
        }
        (Some(all), None) => all,
        (None, Some(any)) => any,
        (None, None) => index.all_since(start).collect(),
    };

    for component in spec.none.iter() {
        if matched.is_empty() {
            break;
        }
        let excluded = index.containing(component, start);
        if !excluded.is_empty() {
            matched.retain(|id| excluded.binary_search(id).is_err());
        }
    }

    matched
}

/// Intersects the candidate lists of every required component.
///
/// Lists are visited shortest first so the accumulator starts, and stays,
/// as small as possible. The sort is stable and clauses iterate in ascending
/// component order, so equal-length lists keep that order.
fn intersect_all(all: &Signature, index: &ArchetypeIndex, start: usize) -> Vec<ArchetypeId> {
    let mut candidates: Vec<&[ArchetypeId]> =
        all.iter().map(|c| index.containing(c, start)).collect();
    candidates.sort_by_key(|list| list.len());

    let Some((seed, rest)) = candidates.split_first() else {
        return Vec::new();
    };
    let mut acc = seed.to_vec();
    for list in rest {
        if acc.is_empty() {
            break;
        }
        acc.retain(|id| list.binary_search(id).is_ok());
    }
    acc
}

fn union_any(any: &Signature, index: &ArchetypeIndex, start: usize) -> Vec<ArchetypeId> {
    let mut acc: Vec<ArchetypeId> = any
        .iter()
        .flat_map(|c| index.containing(c, start).iter().copied())
        .collect();
    acc.sort_unstable();
    acc.dedup();
    acc
}

// =============================================================================
// Filter Groups
// =============================================================================

/// A cached, versioned filter result.
#[derive(Clone, Debug)]
pub struct FilterGroup {
    spec: FilterSpec,
    version: usize,
    archetypes: Vec<ArchetypeId>,
}

impl FilterGroup {
    /// Evaluates `spec` against every archetype in `index`.
    #[must_use]
    pub fn compute(spec: FilterSpec, index: &ArchetypeIndex) -> Self {
        let archetypes = evaluate(&spec, index, 0);
        Self {
            spec,
            version: index.len(),
            archetypes,
        }
    }

    /// Brings the group up to date with archetypes created since its version.
    ///
    /// Returns true if anything had to be evaluated.
    pub fn refresh(&mut self, index: &ArchetypeIndex) -> bool {
        let current = index.len();
        if self.version >= current {
            return false;
        }

        // New ids are disjoint from and greater than every cached id, and
        // each clause has already been applied to them.
        let fresh = evaluate(&self.spec, index, self.version);
        trace!(
            "refreshed filter group from version {} to {current}: {} new archetypes",
            self.version,
            fresh.len()
        );
        self.archetypes.extend(fresh);
        self.version = current;
        true
    }

    /// Returns true if no archetype has been created since the last refresh.
    #[must_use]
    pub fn is_current(&self, index: &ArchetypeIndex) -> bool {
        self.version >= index.len()
    }

    /// Returns the filter this group caches.
    #[must_use]
    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Returns the archetype count the result covers.
    #[must_use]
    pub fn version(&self) -> usize {
        self.version
    }

    /// Returns the matching archetypes, in creation order.
    #[must_use]
    pub fn archetypes(&self) -> &[ArchetypeId] {
        &self.archetypes
    }
}

/// Filter groups keyed by their spec.
#[derive(Debug, Default)]
pub struct FilterCache {
    groups: Vec<FilterGroup>,
    lookup: HashMap<FilterSpec, usize>,
}

impl FilterCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the up-to-date group for `spec`, creating it on first use.
    ///
    /// The cache keeps its own copy of `spec`; the caller's value can be
    /// changed or dropped afterwards.
    pub fn get_or_update(&mut self, spec: &FilterSpec, index: &ArchetypeIndex) -> &FilterGroup {
        let Some(&slot) = self.lookup.get(spec) else {
            let group = FilterGroup::compute(spec.clone(), index);
            debug!(
                "cached filter group {}: {} archetypes at version {}",
                self.groups.len(),
                group.archetypes.len(),
                group.version
            );
            self.lookup.insert(spec.clone(), self.groups.len());
            self.groups.push(group);
            return &self.groups[self.groups.len() - 1];
        };

        let group = &mut self.groups[slot];
        group.refresh(index);
        group
    }

    /// Returns the group for `spec` without updating it.
    #[must_use]
    pub fn get(&self, spec: &FilterSpec) -> Option<&FilterGroup> {
        self.lookup.get(spec).map(|&slot| &self.groups[slot])
    }

    /// Returns the number of cached groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// =============================================================================
// Query Results
// =============================================================================

/// The entities matched by a filter.
///
/// A query borrows the world, so archetype membership cannot change while
/// it is alive. Entities come out archetype by archetype in creation order;
/// the order within an archetype is unspecified. Components of matched
/// entities are readable through the query itself, so reading while
/// iterating needs no second borrow of the world.
#[derive(Debug)]
pub struct Query<'w> {
    index: &'w ArchetypeIndex,
    entities: &'w EntityStore,
    archetypes: Cow<'w, [ArchetypeId]>,
}

impl<'w> Query<'w> {
    pub(crate) fn new(
        index: &'w ArchetypeIndex,
        entities: &'w EntityStore,
        archetypes: Cow<'w, [ArchetypeId]>,
    ) -> Self {
        Self {
            index,
            entities,
            archetypes,
        }
    }

    /// Returns the matched archetypes, in creation order.
    #[must_use]
    pub fn archetypes(&self) -> &[ArchetypeId] {
        &self.archetypes
    }

    /// Iterates over matched entities without copying them.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.archetypes
            .iter()
            .filter_map(|&id| self.index.get(id))
            .flat_map(|archetype| archetype.entities().iter().copied())
    }

    /// Returns a component of an entity.
    ///
    /// Works for any live entity, matched or not. Returns `None` if the
    /// entity lacks `T` or is no longer alive.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&'w T> {
        let component = registered_component::<T>()?;
        self.entities.slot(entity, component)?.downcast_ref()
    }

    /// Iterates over matched entities that hold a `T`, paired with it.
    pub fn iter_with<T: Component>(&self) -> impl Iterator<Item = (Entity, &'w T)> + '_ {
        self.iter()
            .filter_map(|entity| self.get::<T>(entity).map(|value| (entity, value)))
    }

    /// Counts matched entities by summing archetype lengths.
    #[must_use]
    pub fn count(&self) -> usize {
        self.archetypes
            .iter()
            .filter_map(|&id| self.index.get(id))
            .map(crate::archetype::Archetype::len)
            .sum()
    }

    /// Returns true if no entity matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
