//! Integration tests for World state
//!
//! Tests singletons, configuration, and introspection.

use cohort_storage::{FilterSpec, World, WorldConfig};

use crate::{A, B, init_logging};

// =============================================================================
// Singletons
// =============================================================================

#[test]
fn singleton_is_created_once() {
    init_logging();
    let mut world = World::new();

    let first: *const A = world.singleton::<A>().unwrap();
    let second: *const A = world.singleton::<A>().unwrap();

    assert_eq!(first, second);
    assert_eq!(world.entity_count(), 1);
}

#[test]
fn singleton_state_persists() {
    let mut world = World::new();
    world.singleton::<A>().unwrap().0 = 41;
    world.singleton::<A>().unwrap().0 += 1;
    assert_eq!(world.singleton::<A>().unwrap(), &A(42));
}

#[test]
fn singleton_ignores_entities_with_more_components() {
    let mut world = World::new();
    let wide = world.spawn_with((A(9), B(9))).unwrap();

    assert_eq!(world.singleton::<A>().unwrap(), &A(0));
    assert_eq!(world.entity_count(), 2);
    assert_eq!(world.get::<A>(wide), Some(&A(9)));
}

#[test]
fn singleton_adopts_existing_sole_holder() {
    let mut world = World::new();
    let e = world.spawn_with((B(5),)).unwrap();

    assert_eq!(world.singleton::<B>().unwrap(), &B(5));
    assert_eq!(world.entity_count(), 1);
    assert!(world.exists(e));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn default_config() {
    let world = World::new();
    assert_eq!(world.config(), &WorldConfig::default());
    assert!(world.config().filter_cache);
}

#[test]
fn capacities_do_not_change_behaviour() {
    let mut world = World::with_config(
        WorldConfig::new()
            .with_entity_capacity(1024)
            .with_archetype_capacity(64),
    );
    let e = world.spawn_with((A(1),)).unwrap();
    assert_eq!(world.filter_count(&FilterSpec::new().all::<A>()), 1);
    assert!(world.exists(e));
    assert_eq!(world.archetype_count(), 2);
}

#[test]
fn uncached_world_keeps_no_groups() {
    let mut world = World::with_config(WorldConfig::new().with_filter_cache(false));
    world.spawn_with((A(1),)).unwrap();
    assert_eq!(world.filter_count(&FilterSpec::new().all::<A>()), 1);
    assert_eq!(world.cached_filters(), 0);
}

// =============================================================================
// Introspection
// =============================================================================

#[test]
fn archetype_signatures_are_unique() {
    let mut world = World::new();
    for _ in 0..3 {
        let e = world.spawn();
        world.add(e, A(0)).unwrap();
        world.add(e, B(0)).unwrap();
        world.remove::<A>(e).unwrap();
    }

    let signatures: Vec<_> = world.archetypes().iter().map(|a| a.signature().clone()).collect();
    let mut deduped = signatures.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(signatures.len(), deduped.len());
    // {}, {A}, {A, B}, {B}
    assert_eq!(world.archetype_count(), 4);
}

#[test]
fn worlds_are_independent() {
    let mut left = World::new();
    let mut right = World::new();
    left.spawn_with((A(1), B(1))).unwrap();

    assert_eq!(right.filter_count(&FilterSpec::new().all::<A>()), 0);
    assert_eq!(right.archetype_count(), 1);
    assert_eq!(right.entity_count(), 0);
}
