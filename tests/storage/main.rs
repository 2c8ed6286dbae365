//! Integration tests for Layer 1: Storage
//!
//! Tests for entity lifecycle, component transitions, cached filters, and world state.

mod entities;
mod world;

/// Routes `log` output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Component types shared by the scenarios.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct A(pub u32);
#[derive(Debug, Default, Clone, PartialEq)]
pub struct B(pub u32);
#[derive(Debug, Default, Clone, PartialEq)]
pub struct C(pub u32);
#[derive(Debug, Default, Clone, PartialEq)]
pub struct D(pub u32);
