//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: EntityId, component type identity, Signature, and Error.

mod entities;
mod errors;
mod signatures;
