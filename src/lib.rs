//! Statewise: well-formedness checking for UML-style state machine models
//!
//! Statewise takes a fully built, in-memory state machine model and reports
//! every way in which it breaks the modeling rules. Validation never stops
//! at the first problem: findings accumulate into a [`ValidationErrors`]
//! collection, each located by a path such as `Regions[0].States[1].Entry`.
//!
//! # Layers
//!
//! - **Entity rules** ([`rules`]): per-element constraints such as required
//!   fields, enumerated domains, multiplicities and transition scoping.
//! - **Structural integrity** ([`structure`]): whole-graph checks for
//!   unique IDs, resolvable references and acyclic, type-compatible
//!   containment and submachine relations.
//!
//! [`validate_model`] runs both.
//!
//! # Example
//!
//! ```rust
//! use statewise::model::{Pseudostate, Region, State, StateMachine, Transition};
//! use statewise::validation::ErrorKind;
//!
//! let initial = Pseudostate::initial("init");
//! let idle = State::new("idle", "Idle");
//! let start = Transition::between("t1", &initial.vertex, &idle.vertex);
//!
//! let machine = StateMachine::new("sm", "Door").with_region(
//!     Region::new("main", "Main")
//!         .with_vertex(initial)
//!         .with_state(idle)
//!         .with_transition(start),
//! );
//! assert!(statewise::validate_model(&machine).is_ok());
//!
//! let empty = StateMachine::new("sm", "Empty");
//! let errors = statewise::validate_model(&empty).unwrap_err();
//! assert_eq!(errors.count(ErrorKind::Multiplicity), 1);
//! ```

pub mod model;
pub mod rules;
pub mod structure;
pub mod validation;

// Re-export commonly used types
pub use model::StateMachine;
pub use rules::Validate;
pub use structure::{validate_structure, validate_structure_with, StructureValidator};
pub use validation::{
    ErrorKind, ObjectType, ValidationContext, ValidationError, ValidationErrors,
    ValidationOptions,
};

/// Run entity rules and structural checks over `machine` with default options.
pub fn validate_model(machine: &StateMachine) -> Result<(), ValidationErrors> {
    validate_model_with(machine, &ValidationOptions::default())
}

/// Run entity rules and structural checks over `machine`.
///
/// Entity findings come first, in traversal order, followed by structural
/// findings.
pub fn validate_model_with(
    machine: &StateMachine,
    options: &ValidationOptions,
) -> Result<(), ValidationErrors> {
    let ctx = ValidationContext::new().with_options(options.clone());
    let mut errors = ValidationErrors::new();

    machine.validate_in(&ctx, &mut errors);
    errors.merge(validate_structure_with(machine, options));

    tracing::debug!(
        machine = %machine.id,
        errors = errors.len(),
        "model validation finished"
    );
    errors.into_result()
}
