//! Component signatures.
//!
//! A [`Signature`] is a sorted, deduplicated set of [`ComponentIndex`]
//! values. It identifies an archetype and is also used for each clause of a
//! filter, so two signatures built from the same types in any order, with or
//! without repeats, compare and hash equal.

use std::fmt;
use std::iter::FromIterator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::component::ComponentIndex;

/// Sorted set of component types.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signature {
    /// Component types, sorted by index for consistent identity.
    components: Vec<ComponentIndex>,
}

impl Signature {
    /// Creates the empty signature.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: Vec::new(),
        }
    }

    /// Creates a signature from a list of components.
    #[must_use]
    pub fn from_components(mut components: Vec<ComponentIndex>) -> Self {
        components.sort_unstable();
        components.dedup();
        Self { components }
    }

    /// Returns the components in this signature, in ascending order.
    #[must_use]
    pub fn components(&self) -> &[ComponentIndex] {
        &self.components
    }

    /// Iterates over the components in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ComponentIndex> + '_ {
        self.components.iter().copied()
    }

    /// Returns the number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the signature has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Checks if this signature contains a component.
    #[must_use]
    pub fn contains(&self, component: ComponentIndex) -> bool {
        self.components.binary_search(&component).is_ok()
    }

    /// Checks if this signature contains every component in `other`.
    #[must_use]
    pub fn contains_all(&self, other: &Signature) -> bool {
        other.iter().all(|c| self.contains(c))
    }

    /// Checks if this signature shares at least one component with `other`.
    #[must_use]
    pub fn intersects(&self, other: &Signature) -> bool {
        other.iter().any(|c| self.contains(c))
    }

    /// Returns a new signature with the component added.
    #[must_use]
    pub fn with(&self, component: ComponentIndex) -> Self {
        let mut next = self.clone();
        next.insert(component);
        next
    }

    /// Returns a new signature with the component removed.
    #[must_use]
    pub fn without(&self, component: ComponentIndex) -> Self {
        let mut next = self.clone();
        next.remove(component);
        next
    }

    /// Adds a component in place. Returns false if it was already present.
    pub fn insert(&mut self, component: ComponentIndex) -> bool {
        match self.components.binary_search(&component) {
            Ok(_) => false,
            Err(pos) => {
                self.components.insert(pos, component);
                true
            }
        }
    }

    /// Removes a component in place. Returns false if it was absent.
    pub fn remove(&mut self, component: ComponentIndex) -> bool {
        match self.components.binary_search(&component) {
            Ok(pos) => {
                self.components.remove(pos);
                true
            }
            Err(_) => false,
        }
    }
}

impl FromIterator<ComponentIndex> for Signature {
    fn from_iter<I: IntoIterator<Item = ComponentIndex>>(iter: I) -> Self {
        Self::from_components(iter.into_iter().collect())
    }
}

impl Extend<ComponentIndex> for Signature {
    fn extend<I: IntoIterator<Item = ComponentIndex>>(&mut self, iter: I) {
        self.components.extend(iter);
        self.components.sort_unstable();
        self.components.dedup();
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{component}")?;
        }
        write!(f, "}}")
    }
}
