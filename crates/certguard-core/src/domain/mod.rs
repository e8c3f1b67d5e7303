// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Certguard.
//!
//! This module contains the pure validation engine: the value model, rules
//! and their factories, validators, the domain validator catalog, and the
//! string sanitizers.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: every evaluation completes synchronously
//! - **No I/O**: no filesystem, network, or clock access
//! - **No shared mutable state**: rules and validators are read-only once built
//! - **Failures are data**: a violated rule is a message in a result, never an `Err`
//!
// Public API - what the world sees
pub mod catalog;
pub mod error;
pub mod rule;
pub mod sanitize;
pub mod validator;
pub mod value;

// Private implementation details - factories extend `Rule` in place
mod factories;

// Re-exports for convenience
pub use catalog::{CatalogEntry, CatalogLimits, ValidatorCatalog};
pub use error::{DomainError, ErrorCategory};
pub use rule::Rule;
pub use sanitize::Sanitizer;
pub use validator::{ValidationResult, Validator};
pub use value::{FieldValue, FileRef};

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Cross-module behaviour
    // ========================================================================

    #[test]
    fn rules_are_shareable_between_validators() {
        let required = Rule::required();
        let a = Validator::new().add_rule(required.clone());
        let b = Validator::new()
            .add_rule(required)
            .add_rule(Rule::min_length(3));

        let value = FieldValue::from("ab");
        assert!(a.validate(&value).is_valid());
        assert_eq!(b.validate(&value).errors(), ["Must be at least 3 characters"]);
    }

    #[test]
    fn sanitizing_does_not_change_validation_input() {
        let raw = "<i>Scanned copy</i> is unreadable";
        let v = Validator::new().add_rule(Rule::no_unsafe_markup());

        assert!(!v.validate(&raw.into()).is_valid());
        assert!(v.validate(&sanitize::text(raw).into()).is_valid());
    }

    #[test]
    fn validators_are_usable_across_threads() {
        let catalog = std::sync::Arc::new(ValidatorCatalog::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let catalog = std::sync::Arc::clone(&catalog);
                std::thread::spawn(move || {
                    catalog
                        .get(CatalogEntry::RejectReason)
                        .validate(&format!("Reason number {i} is long enough").into())
                        .is_valid()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
