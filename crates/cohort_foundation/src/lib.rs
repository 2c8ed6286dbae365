//! Core types for Cohort.
//!
//! This crate provides:
//! - [`EntityId`] - Monotonic, never-reused entity identifiers
//! - [`ComponentIndex`] - Dense component type identity from a process-wide registry
//! - [`Signature`] - Sorted, deduplicated sets of component types
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod component;
pub mod entity;
pub mod error;
pub mod signature;

pub use component::{
    Component, ComponentIndex, ComponentInfo, ComponentRegistry, MAX_COMPONENT_TYPES,
    component_index, component_info, component_name, registered_component,
    registered_component_count, try_component_index,
};
pub use entity::{EntityId, EntityIdAllocator};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use signature::Signature;
