//! Entity-local well-formedness rules.
//!
//! Every model entity implements [`Validate`]. Rules append to a shared
//! [`ValidationErrors`] collection instead of returning early, and nested
//! entities are validated with the parent's context extended by the field
//! they live in, so each finding carries its full locator.
//!
//! # Example
//!
//! ```rust
//! use statewise::model::{Behavior, State};
//! use statewise::rules::Validate;
//! use statewise::validation::ErrorKind;
//!
//! let state = State::new("s1", "Idle").with_entry(Behavior::new("b1", ""));
//!
//! let errors = state.validate().unwrap_err();
//! assert_eq!(errors.len(), 1);
//!
//! let error = errors.iter().next().unwrap();
//! assert_eq!(error.kind, ErrorKind::Required);
//! assert_eq!(error.path, "Entry");
//! assert_eq!(error.field, "Specification");
//! ```

mod behavior;
mod machine;
mod region;
mod state;
mod transition;
mod vertex;

use crate::validation::{
    ErrorKind, ObjectType, ValidationContext, ValidationError, ValidationErrors,
    ValidationOptions,
};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Validation routine of a model entity.
pub trait Validate {
    /// Entity type errors from this rule set are reported against.
    fn object_type(&self) -> ObjectType;

    /// Check this entity and everything it owns, appending findings.
    fn validate_in<'a>(&'a self, ctx: &ValidationContext<'a>, errors: &mut ValidationErrors);

    /// Validate starting from a seeded context.
    fn validate_with<'a>(&'a self, ctx: &ValidationContext<'a>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.validate_in(ctx, &mut errors);
        tracing::debug!(
            object_type = %self.object_type(),
            path = %ctx.path(),
            errors = errors.len(),
            "entity validation finished"
        );
        errors.into_result()
    }

    /// Validate with a fresh context.
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.validate_with(&ValidationContext::new())
    }

    /// Validate with a fresh context carrying `options`.
    fn validate_with_options(&self, options: ValidationOptions) -> Result<(), ValidationErrors> {
        self.validate_with(&ValidationContext::new().with_options(options))
    }

    /// Validate with a fresh context, accumulating into a `Validation`.
    fn check(&self) -> Validation<(), NonEmptyVec<ValidationError>> {
        match self.validate() {
            Ok(()) => Validation::success(()),
            Err(errors) => errors.into_validation(),
        }
    }
}

/// IDs must be non-blank to take part in lookups and graphs.
pub fn is_valid_id(id: &str) -> bool {
    !id.trim().is_empty()
}

/// Report a Required error when `value` is blank.
pub(crate) fn require(
    value: &str,
    object_type: ObjectType,
    field: &str,
    ctx: &ValidationContext<'_>,
    errors: &mut ValidationErrors,
) {
    if value.trim().is_empty() {
        errors.add(ctx.error(
            ErrorKind::Required,
            object_type,
            field,
            format!("{field} is required"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Region, State, StateMachine};

    #[test]
    fn blank_ids_are_invalid() {
        assert!(is_valid_id("s1"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("   "));
    }

    #[test]
    fn check_accumulates_into_validation() {
        let machine = StateMachine::new("", "Nameless");

        match machine.check() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| e.kind == ErrorKind::Required));
                assert!(errors.iter().any(|e| e.kind == ErrorKind::Multiplicity));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn check_succeeds_for_valid_entity() {
        assert!(State::new("s1", "Idle").check().is_success());
    }

    #[test]
    fn seeded_context_prefixes_paths() {
        let region = Region::new("", "Unnamed");
        let ctx = ValidationContext::new().with_index("Regions", 3);

        let errors = region.validate_with(&ctx).unwrap_err();
        assert_eq!(errors.iter().next().map(|e| e.path.as_str()), Some("Regions[3]"));
    }
}
