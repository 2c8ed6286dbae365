//! Cohort - Archetype-based entity store
//!
//! This crate re-exports all layers of the Cohort system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: cohort_storage     — Archetypes, archetype index, cached filters, World
//! Layer 0: cohort_foundation  — EntityId, component type identity, Signature, Error
//! ```
//!
//! # Example
//!
//! ```
//! use cohort::prelude::*;
//!
//! struct Position(f32, f32);
//! struct Velocity(f32, f32);
//!
//! let mut world = World::new();
//! let e = world.spawn_with((Position(0.0, 0.0),)).unwrap();
//! world.add(e, Velocity(1.0, 0.0)).unwrap();
//!
//! let moving = FilterSpec::new().all::<Position>().all::<Velocity>();
//! assert_eq!(world.filter_count(&moving), 1);
//! ```

pub use cohort_foundation as foundation;
pub use cohort_storage as storage;

/// Commonly used types.
pub mod prelude {
    pub use cohort_foundation::{
        Component, ComponentIndex, EntityId, Error, ErrorKind, Result, Signature,
        component_index,
    };
    pub use cohort_storage::{Entity, FilterSpec, Query, World, WorldConfig};
}
