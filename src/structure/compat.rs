//! Type compatibility tables for structural edges.
//!
//! Each table matches exhaustively on [`ObjectType`], so a new entity type
//! does not compile until every table has an answer for it.

use crate::validation::ObjectType;

/// Containment allow-list: which child types a parent type may own.
pub fn can_contain(parent: ObjectType, child: ObjectType) -> bool {
    use ObjectType::*;

    match parent {
        StateMachine => matches!(child, Region | Pseudostate),
        Region => matches!(child, State | Vertex | Pseudostate | FinalState | Transition),
        State => matches!(child, Region | ConnectionPointReference),
        ConnectionPointReference => matches!(child, Pseudostate),
        Vertex | Pseudostate | FinalState | Transition | Constraint | Behavior | Trigger => false,
    }
}

/// Reference deny-list for bidirectional edges: vertex-like elements never
/// point straight at containers or transitions.
pub fn may_reference(from: ObjectType, to: ObjectType) -> bool {
    use ObjectType::*;

    match from {
        Vertex | State | Pseudostate | FinalState | ConnectionPointReference => {
            !matches!(to, StateMachine | Region | Transition)
        }
        StateMachine | Region | Transition | Constraint | Behavior | Trigger => true,
    }
}

/// Submachine edges: only a state may delegate to a state machine.
pub fn may_inherit(child: ObjectType, parent: ObjectType) -> bool {
    use ObjectType::*;

    match child {
        State => matches!(parent, StateMachine),
        StateMachine
        | Region
        | Vertex
        | Pseudostate
        | FinalState
        | Transition
        | ConnectionPointReference
        | Constraint
        | Behavior
        | Trigger => false,
    }
}
