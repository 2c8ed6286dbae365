//! Configuration for a world.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`World`](crate::World).
///
/// Controls preallocation and filter caching.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    /// Entity records to allocate up front.
    pub entity_capacity: usize,

    /// Archetypes to allocate up front.
    pub archetype_capacity: usize,

    /// Whether filter results are cached and refreshed incrementally.
    ///
    /// When false every filter is evaluated from scratch.
    pub filter_cache: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            entity_capacity: 0,
            archetype_capacity: 16,
            filter_cache: true,
        }
    }
}

impl WorldConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the entity capacity.
    #[must_use]
    pub fn with_entity_capacity(mut self, capacity: usize) -> Self {
        self.entity_capacity = capacity;
        self
    }

    /// Builder method to set the archetype capacity.
    #[must_use]
    pub fn with_archetype_capacity(mut self, capacity: usize) -> Self {
        self.archetype_capacity = capacity;
        self
    }

    /// Builder method to enable or disable the filter cache.
    #[must_use]
    pub fn with_filter_cache(mut self, enabled: bool) -> Self {
        self.filter_cache = enabled;
        self
    }

    /// Builder method to evaluate every filter from scratch.
    #[must_use]
    pub fn uncached(self) -> Self {
        self.with_filter_cache(false)
    }
}
