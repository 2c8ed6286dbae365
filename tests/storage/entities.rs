//! Integration tests for entity lifecycle
//!
//! Tests spawning, destruction, record pooling, and stale handles.

use cohort_foundation::ErrorKind;
use cohort_storage::World;

use crate::{A, B, init_logging};

// =============================================================================
// Spawning
// =============================================================================

#[test]
fn spawn_gives_increasing_ids() {
    let mut world = World::new();
    let ids: Vec<_> = (0..5).map(|_| world.spawn().id()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(world.entity_count(), 5);
}

#[test]
fn spawned_entity_is_in_empty_archetype() {
    let mut world = World::new();
    let e = world.spawn();
    assert_eq!(world.archetype_of(e).unwrap(), world.archetypes().empty().id());
    assert!(world.signature_of(e).unwrap().is_empty());
    assert_eq!(world.archetype_count(), 1);
}

#[test]
fn entities_iterates_live_entities() {
    let mut world = World::new();
    let a = world.spawn();
    let b = world.spawn();
    let c = world.spawn();
    world.destroy(b).unwrap();

    let live: Vec<_> = world.entities().collect();
    assert_eq!(live.len(), 2);
    assert!(live.contains(&a));
    assert!(live.contains(&c));
}

// =============================================================================
// Destruction and Pooling
// =============================================================================

#[test]
fn destroy_pools_the_record() {
    init_logging();
    let mut world = World::new();
    let e = world.spawn();
    world.destroy(e).unwrap();

    assert!(!world.exists(e));
    assert_eq!(world.entity_count(), 0);
    assert_eq!(world.pooled_entities(), 1);

    let reused = world.spawn();
    assert_eq!(world.pooled_entities(), 0);
    assert!(reused.id() > e.id());
    assert!(world.exists(reused));
    assert!(!world.exists(e));
}

#[test]
fn reused_record_starts_empty() {
    let mut world = World::new();
    let e = world.spawn();
    world.add(e, A(1)).unwrap();
    world.destroy(e).unwrap();

    let reused = world.spawn();
    assert!(!world.has::<A>(reused));
    assert!(world.get::<A>(reused).is_none());
    world.check_consistency().unwrap();
}

#[test]
fn destroy_keeps_other_rows_valid() {
    let mut world = World::new();
    let entities: Vec<_> = (0..4)
        .map(|i| world.spawn_with((A(i), B(i))).unwrap())
        .collect();

    world.destroy(entities[0]).unwrap();
    world.check_consistency().unwrap();

    for (i, &e) in entities.iter().enumerate().skip(1) {
        let expected = u32::try_from(i).unwrap();
        assert_eq!(world.get::<A>(e), Some(&A(expected)));
        assert_eq!(world.get::<B>(e), Some(&B(expected)));
    }
}

// =============================================================================
// Stale Handles
// =============================================================================

#[test]
fn destroyed_handle_is_stale() {
    let mut world = World::new();
    let e = world.spawn();
    world.destroy(e).unwrap();

    let err = world.destroy(e).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StaleEntity(id) if id == e.id()));
    assert!(world.add(e, A(0)).is_err());
    assert!(world.archetype_of(e).is_err());
}

#[test]
fn old_handle_does_not_alias_reused_record() {
    let mut world = World::new();
    let old = world.spawn();
    world.destroy(old).unwrap();
    let new = world.spawn_with((A(7),)).unwrap();

    assert!(world.get::<A>(old).is_none());
    assert!(!world.has::<A>(old));
    assert!(world.remove::<A>(old).is_err());
    assert_eq!(world.get::<A>(new), Some(&A(7)));
}
