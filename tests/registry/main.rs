//! Integration tests for the process-wide component registry
//!
//! Registers every component type the process can hold. This lives in its
//! own test target so the exhausted registry cannot leak into other tests.

use std::panic::catch_unwind;

use cohort_foundation::{
    ErrorKind, MAX_COMPONENT_TYPES, component_index, registered_component,
    registered_component_count, try_component_index,
};

#[allow(dead_code)]
struct Tag<const HI: usize, const LO: usize>;

/// Registers `Tag<HI, 0>` through `Tag<HI, 15>`.
fn fill_row<const HI: usize>() {
    let _ = component_index::<Tag<HI, 0>>();
    let _ = component_index::<Tag<HI, 1>>();
    let _ = component_index::<Tag<HI, 2>>();
    let _ = component_index::<Tag<HI, 3>>();
    let _ = component_index::<Tag<HI, 4>>();
    let _ = component_index::<Tag<HI, 5>>();
    let _ = component_index::<Tag<HI, 6>>();
    let _ = component_index::<Tag<HI, 7>>();
    let _ = component_index::<Tag<HI, 8>>();
    let _ = component_index::<Tag<HI, 9>>();
    let _ = component_index::<Tag<HI, 10>>();
    let _ = component_index::<Tag<HI, 11>>();
    let _ = component_index::<Tag<HI, 12>>();
    let _ = component_index::<Tag<HI, 13>>();
    let _ = component_index::<Tag<HI, 14>>();
    let _ = component_index::<Tag<HI, 15>>();
}

/// Registers 256 distinct component types.
fn fill_registry() {
    fill_row::<0>();
    fill_row::<1>();
    fill_row::<2>();
    fill_row::<3>();
    fill_row::<4>();
    fill_row::<5>();
    fill_row::<6>();
    fill_row::<7>();
    fill_row::<8>();
    fill_row::<9>();
    fill_row::<10>();
    fill_row::<11>();
    fill_row::<12>();
    fill_row::<13>();
    fill_row::<14>();
    fill_row::<15>();
}

#[test]
fn exhausting_the_registry_is_fatal() {
    assert_eq!(registered_component_count(), 0);

    fill_registry();
    assert_eq!(registered_component_count(), MAX_COMPONENT_TYPES);

    // Indices are dense and sequential.
    assert_eq!(component_index::<Tag<0, 0>>().index(), 0);
    assert_eq!(component_index::<Tag<15, 15>>().index(), MAX_COMPONENT_TYPES - 1);

    let err = try_component_index::<Tag<16, 0>>().unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::ComponentCapacityExceeded { capacity: 256 }
    ));

    let overflow = catch_unwind(component_index::<Tag<16, 0>>);
    assert!(overflow.is_err());

    // The failed registrations left the registry untouched.
    assert!(registered_component::<Tag<16, 0>>().is_none());
    assert_eq!(registered_component_count(), MAX_COMPONENT_TYPES);
    assert!(try_component_index::<Tag<7, 3>>().is_ok());
}
