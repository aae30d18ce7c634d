//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use tessera_foundation::category::{ELEMENT, FAMILY};
use tessera_foundation::{Error, ErrorContext, ErrorKind, Identity};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_ownership_conflict() {
    let item = Identity::new();
    let owner = Identity::new();
    let requested = Identity::new();
    let err = Error::ownership_conflict(item, owner, Some(requested));

    let ErrorKind::OwnershipConflict {
        item: i,
        current_owner,
        requested_owner,
    } = err.kind
    else {
        panic!("expected an ownership conflict");
    };
    assert_eq!(i, item);
    assert_eq!(current_owner, owner);
    assert_eq!(requested_owner, Some(requested));
}

#[test]
fn error_unregistered_category() {
    let err = Error::unregistered_category(FAMILY);
    assert!(matches!(err.kind, ErrorKind::UnregisteredIdentityCategory(ref k) if *k == FAMILY));
    assert!(format!("{err}").contains("Family"));
}

#[test]
fn error_not_found() {
    let err = Error::not_found("Tessera", "Element", "7");
    let msg = format!("{err}");
    assert!(msg.contains("Tessera"));
    assert!(msg.contains("Element"));
    assert!(msg.contains('7'));
}

#[test]
fn error_component_construction() {
    let err = Error::component_construction("Support", "no default construction path");
    let msg = format!("{err}");
    assert!(msg.contains("Support"));
    assert!(msg.contains("no default construction path"));
}

#[test]
fn error_cyclic_hierarchy() {
    let err = Error::cyclic_kind_hierarchy(ELEMENT, ELEMENT);
    assert!(format!("{err}").contains("cycle"));
}

#[test]
fn error_invalid_list() {
    let err = Error::invalid_list("1 to", "range has no upper bound");
    assert!(matches!(err.kind, ErrorKind::InvalidListDefinition { .. }));
}

#[test]
fn error_internal() {
    let err = Error::internal("counter exhausted");
    assert!(format!("{err}").contains("internal error: counter exhausted"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_context_display() {
    let ctx = ErrorContext::new()
        .with_source("PanelElement 'Slab 1'")
        .with_frame("resolved_id(sub_index = 2)")
        .with_frame("export");
    let shown = ctx.to_string();
    assert!(shown.starts_with("at PanelElement 'Slab 1'"));
    assert!(shown.contains("  in resolved_id(sub_index = 2)"));
    assert!(shown.contains("  in export"));
}

#[test]
fn error_context_is_optional() {
    let err = Error::unregistered_category(FAMILY);
    assert!(err.context.is_none());
    let err = err.with_context(ErrorContext::new().with_source("x"));
    assert!(err.context.is_some());
}

#[test]
fn errors_propagate_with_question_mark() {
    fn inner() -> tessera_foundation::Result<u32> {
        Err(Error::unregistered_category(FAMILY))
    }
    fn outer() -> tessera_foundation::Result<u32> {
        let value = inner()?;
        Ok(value + 1)
    }
    assert!(outer().is_err());
}
