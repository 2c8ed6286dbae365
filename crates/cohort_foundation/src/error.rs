//! Error types for the Cohort system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;

/// Result type used throughout Cohort.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Cohort operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a duplicate component error.
    #[must_use]
    pub fn duplicate_component(entity: EntityId, component: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateComponent {
            entity,
            component: component.into(),
        })
    }

    /// Creates a missing component error.
    #[must_use]
    pub fn missing_component(entity: EntityId, component: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingComponent {
            entity,
            component: component.into(),
        })
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(id: EntityId) -> Self {
        Self::new(ErrorKind::StaleEntity(id))
    }

    /// Creates a component capacity error.
    #[must_use]
    pub fn capacity_exceeded(capacity: usize) -> Self {
        Self::new(ErrorKind::ComponentCapacityExceeded { capacity })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this is a duplicate component error.
    #[must_use]
    pub fn is_duplicate_component(&self) -> bool {
        matches!(self.kind, ErrorKind::DuplicateComponent { .. })
    }

    /// Returns true if this is a missing component error.
    #[must_use]
    pub fn is_missing_component(&self) -> bool {
        matches!(self.kind, ErrorKind::MissingComponent { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Component is already attached to the entity.
    #[error("duplicate component: {component} already on entity {entity:?}")]
    DuplicateComponent {
        /// The entity that was modified.
        entity: EntityId,
        /// Name of the component type.
        component: String,
    },

    /// Component is not attached to the entity.
    #[error("component not found: {component} on entity {entity:?}")]
    MissingComponent {
        /// The entity that was queried.
        entity: EntityId,
        /// Name of the component type.
        component: String,
    },

    /// Entity handle refers to a destroyed entity.
    #[error("stale entity reference: {0:?}")]
    StaleEntity(EntityId),

    /// The component type registry is full.
    #[error("component capacity exceeded: at most {capacity} component types")]
    ComponentCapacityExceeded {
        /// The fixed number of component types supported.
        capacity: usize,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that failed, e.g. `add` or `remove`.
    pub operation: Option<&'static str>,
    /// Archetype signature the entity lived in, rendered for display.
    pub signature: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failing operation.
    #[must_use]
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Sets the signature of the entity's archetype.
    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = self.operation {
            write!(f, "in {operation}")?;
        }
        if let Some(signature) = &self.signature {
            if self.operation.is_some() {
                write!(f, " ")?;
            }
            write!(f, "with signature {signature}")?;
        }
        Ok(())
    }
}
