//! Integration tests for Signature
//!
//! Tests canonical ordering and set operations.

use std::collections::HashSet;

use cohort_foundation::{ComponentIndex, Signature};
use proptest::prelude::*;

fn sig(raw: &[u8]) -> Signature {
    raw.iter().copied().map(ComponentIndex::new).collect()
}

// =============================================================================
// Signature
// =============================================================================

#[test]
fn signature_is_order_independent() {
    assert_eq!(sig(&[3, 1, 2]), sig(&[1, 2, 3]));
    assert_eq!(sig(&[2, 2, 1]), sig(&[1, 2]));
}

#[test]
fn signature_hashes_by_set() {
    let mut set = HashSet::new();
    set.insert(sig(&[1, 4]));
    set.insert(sig(&[4, 1]));
    assert_eq!(set.len(), 1);
}

#[test]
fn signature_with_and_without() {
    let base = sig(&[0, 2]);
    let grown = base.with(ComponentIndex::new(1));
    assert_eq!(grown, sig(&[0, 1, 2]));
    assert_eq!(grown.without(ComponentIndex::new(1)), base);
    assert_eq!(base.with(ComponentIndex::new(2)), base);
}

#[test]
fn signature_set_queries() {
    let abd = sig(&[0, 1, 3]);
    assert!(abd.contains_all(&sig(&[1, 3])));
    assert!(!abd.contains_all(&sig(&[2])));
    assert!(abd.intersects(&sig(&[2, 3])));
    assert!(!abd.intersects(&Signature::new()));
}

#[test]
fn signature_display() {
    assert_eq!(sig(&[5, 1]).to_string(), "{1, 5}");
    assert_eq!(Signature::new().to_string(), "{}");
}

proptest! {
    #[test]
    fn signature_components_are_sorted_and_unique(raw in prop::collection::vec(any::<u8>(), 0..32)) {
        let signature = sig(&raw);
        let components = signature.components();
        prop_assert!(components.windows(2).all(|w| w[0] < w[1]));
        for r in raw {
            prop_assert!(signature.contains(ComponentIndex::new(r)));
        }
    }

    #[test]
    fn insert_reports_novelty(raw in prop::collection::vec(any::<u8>(), 0..32)) {
        let mut signature = Signature::new();
        let mut seen = HashSet::new();
        for r in raw {
            prop_assert_eq!(signature.insert(ComponentIndex::new(r)), seen.insert(r));
        }
        prop_assert_eq!(signature.len(), seen.len());
    }
}
