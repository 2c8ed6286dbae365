//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use cohort_foundation::{EntityId, Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_duplicate_component() {
    let err = Error::duplicate_component(EntityId::new(42), "Position");
    assert!(matches!(err.kind, ErrorKind::DuplicateComponent { .. }));
    assert!(err.is_duplicate_component());
    let msg = format!("{err}");
    assert!(msg.contains("Position"));
    assert!(msg.contains("42"));
}

#[test]
fn error_missing_component() {
    let err = Error::missing_component(EntityId::new(3), "Velocity");
    assert!(err.is_missing_component());
    assert!(!err.is_duplicate_component());
    assert!(format!("{err}").contains("Velocity"));
}

#[test]
fn error_stale_entity() {
    let err = Error::stale_entity(EntityId::new(5));
    assert!(matches!(err.kind, ErrorKind::StaleEntity(id) if id == EntityId::new(5)));
    assert!(format!("{err}").contains('5'));
}

#[test]
fn error_capacity_exceeded() {
    let err = Error::capacity_exceeded(256);
    assert!(matches!(
        err.kind,
        ErrorKind::ComponentCapacityExceeded { capacity: 256 }
    ));
    assert!(format!("{err}").contains("256"));
}

#[test]
fn error_internal() {
    let err = Error::internal("row out of range");
    assert!(matches!(err.kind, ErrorKind::Internal(_)));
    assert!(format!("{err}").contains("row out of range"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_is_optional() {
    let err = Error::internal("oops");
    assert!(err.context.is_none());
}

#[test]
fn context_renders_operation_and_signature() {
    let err = Error::missing_component(EntityId::new(1), "Health").with_context(
        ErrorContext::new()
            .with_operation("remove")
            .with_signature("{0, 2}"),
    );
    let context = err.context.as_ref().unwrap();
    assert_eq!(context.operation, Some("remove"));
    assert_eq!(context.to_string(), "in remove with signature {0, 2}");
}

#[test]
fn context_renders_signature_alone() {
    let context = ErrorContext::new().with_signature("{}");
    assert_eq!(context.to_string(), "with signature {}");
}

#[test]
fn errors_are_std_errors() {
    fn takes_std_error(_: &dyn std::error::Error) {}
    takes_std_error(&Error::internal("x"));
}
