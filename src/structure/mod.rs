//! Structural integrity of a model graph.
//!
//! Entity rules look at one element at a time. This module looks at the
//! whole graph reachable from a root: it builds containment, submachine and
//! bidirectional-reference maps keyed by element ID, then checks that
//!
//! - IDs are unique and every reference resolves,
//! - containment and submachine edges connect compatible types,
//! - neither relation loops back on itself,
//! - bidirectional references are recorded in both directions.
//!
//! # Example
//!
//! ```rust
//! use statewise::model::{Pseudostate, Region, State, StateMachine};
//! use statewise::structure::validate_structure;
//!
//! // A state and a pseudostate sharing one ID.
//! let machine = StateMachine::new("sm", "Machine").with_region(
//!     Region::new("main", "Main")
//!         .with_state(State::new("s1", "Idle"))
//!         .with_vertex(Pseudostate::initial("s1")),
//! );
//!
//! let errors = validate_structure(&machine);
//! assert_eq!(errors.len(), 1);
//! assert!(errors.iter().next().unwrap().message.starts_with("duplicate ID 's1'"));
//! ```

pub mod compat;
mod cycle;
pub mod element;
mod graph;
mod validator;

pub use compat::{can_contain, may_inherit, may_reference};
pub use element::Element;
pub use validator::StructureValidator;

use crate::validation::{ValidationErrors, ValidationOptions};

/// Check the graph reachable from `root` with default options.
pub fn validate_structure<'a>(root: impl Into<Element<'a>>) -> ValidationErrors {
    StructureValidator::new().run(root)
}

/// Check the graph reachable from `root`.
pub fn validate_structure_with<'a>(
    root: impl Into<Element<'a>>,
    options: &ValidationOptions,
) -> ValidationErrors {
    StructureValidator::new()
        .with_options(options.clone())
        .run(root)
}
