//! Component type identity.
//!
//! Every distinct component type gets a small dense [`ComponentIndex`] the
//! first time it is used. Indices are assigned sequentially from zero by a
//! process-wide, append-only registry and are stable for the lifetime of the
//! process. Worlds only ever read the registry; it is shared between them.
//!
//! The registry holds at most [`MAX_COMPONENT_TYPES`] types. Exceeding that
//! is a configuration error: [`component_index`] panics, while
//! [`try_component_index`] reports it as an [`Error`].

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use log::debug;
use parking_lot::RwLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum number of distinct component types per process.
pub const MAX_COMPONENT_TYPES: usize = 256;

/// Marker for types that can be attached to entities.
///
/// Identity is nominal: two distinct Rust types are always distinct
/// components, whatever their layout.
pub trait Component: Any {}

impl<T: Any> Component for T {}

/// Dense index identifying a component type.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComponentIndex(u8);

impl ComponentIndex {
    /// Creates an index from its raw value.
    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Returns the index as a `usize`, for slot addressing.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ComponentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentIndex({})", self.0)
    }
}

impl fmt::Display for ComponentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Diagnostics metadata for a registered component type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ComponentInfo {
    /// Index assigned to the type.
    pub index: ComponentIndex,
    /// Rust type name, for messages.
    pub name: &'static str,
    /// Runtime type identity.
    pub type_id: TypeId,
}

/// Mapping from Rust types to component indices.
///
/// Most code uses the process-wide instance through [`component_index`];
/// standalone registries are useful for tests and tools.
#[derive(Debug)]
pub struct ComponentRegistry {
    by_type: HashMap<TypeId, ComponentIndex>,
    infos: Vec<ComponentInfo>,
    capacity: usize,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentRegistry {
    /// Creates an empty registry holding up to [`MAX_COMPONENT_TYPES`] types.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MAX_COMPONENT_TYPES)
    }

    /// Creates an empty registry with a smaller capacity.
    ///
    /// The capacity is clamped to [`MAX_COMPONENT_TYPES`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_type: HashMap::new(),
            infos: Vec::new(),
            capacity: capacity.min(MAX_COMPONENT_TYPES),
        }
    }

    /// Returns the index of `T`, allocating one on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is full.
    pub fn register<T: Component>(&mut self) -> Result<ComponentIndex> {
        let type_id = TypeId::of::<T>();
        if let Some(&existing) = self.by_type.get(&type_id) {
            return Ok(existing);
        }

        let next = self.infos.len();
        if next >= self.capacity {
            return Err(Error::capacity_exceeded(self.capacity));
        }
        let index = ComponentIndex(
            u8::try_from(next).map_err(|_| Error::capacity_exceeded(self.capacity))?,
        );
        self.by_type.insert(type_id, index);
        self.infos.push(ComponentInfo {
            index,
            name: type_name::<T>(),
            type_id,
        });
        debug!("registered component {} as {index}", type_name::<T>());
        Ok(index)
    }

    /// Returns the index of `T` if it has been registered.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<ComponentIndex> {
        self.by_type.get(&TypeId::of::<T>()).copied()
    }

    /// Returns metadata for an index.
    #[must_use]
    pub fn info(&self, index: ComponentIndex) -> Option<ComponentInfo> {
        self.infos.get(index.index()).copied()
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// Returns true if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}

static REGISTRY: OnceLock<RwLock<ComponentRegistry>> = OnceLock::new();

fn registry() -> &'static RwLock<ComponentRegistry> {
    REGISTRY.get_or_init(|| RwLock::new(ComponentRegistry::new()))
}

/// Returns the process-wide index of `T`, allocating one on first use.
///
/// # Errors
///
/// Returns an error if [`MAX_COMPONENT_TYPES`] types are already registered.
pub fn try_component_index<T: Component>() -> Result<ComponentIndex> {
    if let Some(index) = registry().read().get::<T>() {
        return Ok(index);
    }
    // Another thread may have registered `T` between the two locks;
    // `register` is idempotent so that is harmless.
    registry().write().register::<T>()
}

/// Returns the process-wide index of `T`, allocating one on first use.
///
/// # Panics
///
/// Panics if [`MAX_COMPONENT_TYPES`] types are already registered. That is a
/// configuration error, not a runtime condition.
#[must_use]
pub fn component_index<T: Component>() -> ComponentIndex {
    match try_component_index::<T>() {
        Ok(index) => index,
        Err(err) => panic!("cannot register {}: {err}", type_name::<T>()),
    }
}

/// Returns the process-wide index of `T` without registering it.
#[must_use]
pub fn registered_component<T: Component>() -> Option<ComponentIndex> {
    registry().read().get::<T>()
}

/// Returns metadata for a process-wide index.
#[must_use]
pub fn component_info(index: ComponentIndex) -> Option<ComponentInfo> {
    registry().read().info(index)
}

/// Returns the display name of a process-wide index.
///
/// Unknown indices render as their number.
#[must_use]
pub fn component_name(index: ComponentIndex) -> String {
    component_info(index).map_or_else(|| format!("#{index}"), |info| info.name.to_string())
}

/// Returns the number of component types registered in this process.
#[must_use]
pub fn registered_component_count() -> usize {
    registry().read().len()
}
