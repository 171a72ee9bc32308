//! In-memory metamodel of UML-style state machines.
//!
//! Entities are plain owned values built by an external loader. Nothing in
//! this crate mutates them: the rule set in [`crate::rules`] and the
//! structural engine in [`crate::structure`] only read.
//!
//! Containment in a well-formed model is a tree:
//!
//! - `StateMachine` → `Region`, connection point `Pseudostate`s
//! - `Region` → `State`, `RegionVertex`, `Transition`
//! - `State` → `Region`, `ConnectionPointReference`
//! - `ConnectionPointReference` → `Pseudostate`
//!
//! A submachine state additionally refers to a shared, externally defined
//! `StateMachine`.

mod behavior;
mod kinds;
mod machine;
pub mod macros;
mod region;
mod state;
mod transition;
mod vertex;

pub use behavior::{Behavior, Constraint, Trigger};
pub use kinds::{PseudostateKind, TransitionKind, VertexType};
pub use machine::StateMachine;
pub use region::{Region, RegionVertex};
pub use state::State;
pub use transition::Transition;
pub use vertex::{ConnectionPointReference, FinalState, Pseudostate, Vertex};
