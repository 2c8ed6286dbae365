//! Integration tests for EntityId
//!
//! Tests id allocation, the null sentinel, and formatting.

use std::collections::HashSet;

use cohort_foundation::{EntityId, EntityIdAllocator};

// =============================================================================
// Allocation
// =============================================================================

#[test]
fn entity_ids_are_monotonic() {
    let mut ids = EntityIdAllocator::new();
    let a = ids.allocate();
    let b = ids.allocate();
    let c = ids.allocate();
    assert!(a < b && b < c);
    assert_eq!(ids.allocated(), 3);
}

#[test]
fn allocators_are_independent() {
    let mut left = EntityIdAllocator::new();
    let mut right = EntityIdAllocator::new();
    left.allocate();
    left.allocate();
    assert_eq!(right.allocate(), EntityId::new(0));
    assert_eq!(left.allocated(), 2);
}

#[test]
fn allocated_ids_are_distinct() {
    let mut ids = EntityIdAllocator::new();
    let seen: HashSet<_> = (0..100).map(|_| ids.allocate()).collect();
    assert_eq!(seen.len(), 100);
}

// =============================================================================
// Sentinel and Formatting
// =============================================================================

#[test]
fn null_entity_id() {
    assert!(EntityId::null().is_null());
    assert!(!EntityId::new(0).is_null());
    assert_eq!(EntityId::new(9).raw(), 9);
}

#[test]
fn default_is_zero() {
    assert_eq!(EntityId::default().raw(), 0);
}

#[test]
fn display_and_debug() {
    assert_eq!(EntityId::new(3).to_string(), "Entity(3)");
    assert_eq!(format!("{:?}", EntityId::null()), "EntityId(null)");
}
