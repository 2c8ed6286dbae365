//! Component bundles for spawning entities with initial components.

use std::any::type_name;

use cohort_foundation::{Component, ComponentIndex, component_index};

use crate::entity::ComponentBox;

/// One type-erased component value taken from a bundle.
pub struct BundleComponent {
    pub(crate) index: ComponentIndex,
    pub(crate) name: &'static str,
    pub(crate) value: ComponentBox,
}

impl BundleComponent {
    /// Boxes a component value together with its type identity.
    #[must_use]
    pub fn new<T: Component>(value: T) -> Self {
        Self {
            index: component_index::<T>(),
            name: type_name::<T>(),
            value: Box::new(value),
        }
    }

    /// Returns the component's type index.
    #[must_use]
    pub fn index(&self) -> ComponentIndex {
        self.index
    }
}

/// A group of components attached to an entity in one step.
///
/// Implemented for tuples of up to eight components and for `()`.
pub trait Bundle {
    /// Breaks the bundle into boxed components, in tuple order.
    fn into_components(self) -> Vec<BundleComponent>;
}

impl Bundle for () {
    fn into_components(self) -> Vec<BundleComponent> {
        Vec::new()
    }
}

macro_rules! impl_bundle {
    ($($name:ident),+) => {
        impl<$($name: Component),+> Bundle for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_components(self) -> Vec<BundleComponent> {
                let ($($name,)+) = self;
                vec![$(BundleComponent::new($name)),+]
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);
