//! Regions: containers of states, vertices and transitions.

use super::kinds::PseudostateKind;
use super::state::State;
use super::transition::Transition;
use super::vertex::{FinalState, Pseudostate, Vertex};
use serde::{Deserialize, Serialize};

/// Entry of a region's vertex list.
///
/// States are listed in full in [`Region::states`] and appear here as a
/// plain [`Vertex`] with the same ID.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegionVertex {
    Vertex(Vertex),
    Pseudostate(Pseudostate),
    FinalState(FinalState),
}

impl RegionVertex {
    /// The shared vertex shape.
    pub fn vertex(&self) -> &Vertex {
        match self {
            Self::Vertex(vertex) => vertex,
            Self::Pseudostate(pseudostate) => &pseudostate.vertex,
            Self::FinalState(final_state) => &final_state.vertex,
        }
    }

    pub fn id(&self) -> &str {
        &self.vertex().id
    }

    pub fn as_pseudostate(&self) -> Option<&Pseudostate> {
        match self {
            Self::Pseudostate(pseudostate) => Some(pseudostate),
            _ => None,
        }
    }

    pub fn is_final_state(&self) -> bool {
        matches!(self, Self::FinalState(_))
    }
}

impl From<Vertex> for RegionVertex {
    fn from(vertex: Vertex) -> Self {
        Self::Vertex(vertex)
    }
}

impl From<Pseudostate> for RegionVertex {
    fn from(pseudostate: Pseudostate) -> Self {
        Self::Pseudostate(pseudostate)
    }
}

impl From<FinalState> for RegionVertex {
    fn from(final_state: FinalState) -> Self {
        Self::FinalState(final_state)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub vertices: Vec<RegionVertex>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl Region {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a state together with its vertex bookkeeping entry.
    pub fn with_state(mut self, state: State) -> Self {
        self.vertices.push(RegionVertex::Vertex(state.vertex.clone()));
        self.states.push(state);
        self
    }

    pub fn with_vertex(mut self, vertex: impl Into<RegionVertex>) -> Self {
        self.vertices.push(vertex.into());
        self
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn vertex(&self, id: &str) -> Option<&RegionVertex> {
        self.vertices.iter().find(|v| v.id() == id)
    }

    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.iter().find(|s| s.vertex.id == id)
    }

    /// Indices into `vertices` of pseudostates with the given kind.
    pub fn pseudostate_indices(&self, kind: &PseudostateKind) -> Vec<usize> {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.as_pseudostate().is_some_and(|p| &p.kind == kind))
            .map(|(index, _)| index)
            .collect()
    }
}
