//! Archetype storage and incremental queries for Cohort.
//!
//! This crate provides:
//! - [`Archetype`] - Dense storage for entities sharing one signature
//! - [`ArchetypeIndex`] - Signature lookup plus a per-component inverted index
//! - [`FilterSpec`] and [`FilterCache`] - All/Any/None filters with versioned caching
//! - [`World`] - Entity lifecycle, component moves, and queries

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod archetype;
pub mod bundle;
pub mod config;
pub mod entity;
pub mod filter;
pub mod index;
pub mod world;

pub use archetype::{Archetype, ArchetypeId};
pub use bundle::{Bundle, BundleComponent};
pub use config::WorldConfig;
pub use entity::{Entity, EntityLocation, EntityStore};
pub use filter::{FilterCache, FilterGroup, FilterSpec, Query, evaluate};
pub use index::ArchetypeIndex;
pub use world::World;
