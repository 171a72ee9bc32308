//! Borrowed view of the entities that take part in structural graphs.

use crate::model::{
    ConnectionPointReference, FinalState, Pseudostate, Region, RegionVertex, State,
    StateMachine, Transition, Vertex,
};
use crate::validation::ObjectType;
use std::ptr;

/// A graph-participating model entity.
///
/// Constraints, behaviors and triggers are leaf values owned by their parent
/// and never appear in containment or reference graphs.
#[derive(Clone, Copy, Debug)]
pub enum Element<'a> {
    StateMachine(&'a StateMachine),
    Region(&'a Region),
    Vertex(&'a Vertex),
    State(&'a State),
    Pseudostate(&'a Pseudostate),
    FinalState(&'a FinalState),
    Transition(&'a Transition),
    ConnectionPointReference(&'a ConnectionPointReference),
}

impl<'a> Element<'a> {
    pub fn id(&self) -> &'a str {
        match *self {
            Self::StateMachine(machine) => &machine.id,
            Self::Region(region) => &region.id,
            Self::Vertex(vertex) => &vertex.id,
            Self::State(state) => &state.vertex.id,
            Self::Pseudostate(pseudostate) => &pseudostate.vertex.id,
            Self::FinalState(final_state) => &final_state.vertex.id,
            Self::Transition(transition) => &transition.id,
            Self::ConnectionPointReference(connection) => &connection.vertex.id,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::StateMachine(_) => ObjectType::StateMachine,
            Self::Region(_) => ObjectType::Region,
            Self::Vertex(_) => ObjectType::Vertex,
            Self::State(_) => ObjectType::State,
            Self::Pseudostate(_) => ObjectType::Pseudostate,
            Self::FinalState(_) => ObjectType::FinalState,
            Self::Transition(_) => ObjectType::Transition,
            Self::ConnectionPointReference(_) => ObjectType::ConnectionPointReference,
        }
    }

    /// The embedded vertex shape, for vertex-like elements.
    pub fn vertex(&self) -> Option<&'a Vertex> {
        match *self {
            Self::Vertex(vertex) => Some(vertex),
            Self::State(state) => Some(&state.vertex),
            Self::Pseudostate(pseudostate) => Some(&pseudostate.vertex),
            Self::FinalState(final_state) => Some(&final_state.vertex),
            Self::ConnectionPointReference(connection) => Some(&connection.vertex),
            Self::StateMachine(_) | Self::Region(_) | Self::Transition(_) => None,
        }
    }

    /// Whether both refer to the same instance in memory.
    ///
    /// Equal values are not enough: two separately built elements that
    /// happen to compare equal are still two elements.
    pub fn is_same_instance(&self, other: &Element<'_>) -> bool {
        match (*self, *other) {
            (Self::StateMachine(a), Element::StateMachine(b)) => ptr::eq(a, b),
            (Self::Region(a), Element::Region(b)) => ptr::eq(a, b),
            (Self::Vertex(a), Element::Vertex(b)) => ptr::eq(a, b),
            (Self::State(a), Element::State(b)) => ptr::eq(a, b),
            (Self::Pseudostate(a), Element::Pseudostate(b)) => ptr::eq(a, b),
            (Self::FinalState(a), Element::FinalState(b)) => ptr::eq(a, b),
            (Self::Transition(a), Element::Transition(b)) => ptr::eq(a, b),
            (Self::ConnectionPointReference(a), Element::ConnectionPointReference(b)) => {
                ptr::eq(a, b)
            }
            _ => false,
        }
    }

    /// A state and a plain vertex carrying exactly the state's vertex shape,
    /// in either order.
    pub fn is_state_entry_pair(&self, other: &Element<'_>) -> bool {
        match (*self, *other) {
            (Self::State(state), Element::Vertex(vertex)) => state.vertex == *vertex,
            (Self::Vertex(vertex), Element::State(state)) => state.vertex == *vertex,
            _ => false,
        }
    }
}

impl<'a> From<&'a StateMachine> for Element<'a> {
    fn from(machine: &'a StateMachine) -> Self {
        Self::StateMachine(machine)
    }
}

impl<'a> From<&'a Region> for Element<'a> {
    fn from(region: &'a Region) -> Self {
        Self::Region(region)
    }
}

impl<'a> From<&'a Vertex> for Element<'a> {
    fn from(vertex: &'a Vertex) -> Self {
        Self::Vertex(vertex)
    }
}

impl<'a> From<&'a State> for Element<'a> {
    fn from(state: &'a State) -> Self {
        Self::State(state)
    }
}

impl<'a> From<&'a Pseudostate> for Element<'a> {
    fn from(pseudostate: &'a Pseudostate) -> Self {
        Self::Pseudostate(pseudostate)
    }
}

impl<'a> From<&'a FinalState> for Element<'a> {
    fn from(final_state: &'a FinalState) -> Self {
        Self::FinalState(final_state)
    }
}

impl<'a> From<&'a Transition> for Element<'a> {
    fn from(transition: &'a Transition) -> Self {
        Self::Transition(transition)
    }
}

impl<'a> From<&'a ConnectionPointReference> for Element<'a> {
    fn from(connection: &'a ConnectionPointReference) -> Self {
        Self::ConnectionPointReference(connection)
    }
}

impl<'a> From<&'a RegionVertex> for Element<'a> {
    fn from(vertex: &'a RegionVertex) -> Self {
        match vertex {
            RegionVertex::Vertex(vertex) => Self::Vertex(vertex),
            RegionVertex::Pseudostate(pseudostate) => Self::Pseudostate(pseudostate),
            RegionVertex::FinalState(final_state) => Self::FinalState(final_state),
        }
    }
}
