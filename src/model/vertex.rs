//! Vertices: the things a transition can connect.

use super::kinds::{PseudostateKind, VertexType};
use serde::{Deserialize, Serialize};

/// Base shape shared by every vertex specialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertex {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub vertex_type: VertexType,
}

impl Vertex {
    pub fn new(id: impl Into<String>, name: impl Into<String>, vertex_type: VertexType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vertex_type,
        }
    }
}

/// Control vertex expressing the shape of control flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pseudostate {
    #[serde(flatten)]
    pub vertex: Vertex,
    pub kind: PseudostateKind,
}

impl Pseudostate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: PseudostateKind) -> Self {
        Self {
            vertex: Vertex::new(id, name, VertexType::Pseudostate),
            kind,
        }
    }

    /// Shorthand for an unnamed initial pseudostate.
    pub fn initial(id: impl Into<String>) -> Self {
        Self::new(id, "", PseudostateKind::Initial)
    }

    pub fn id(&self) -> &str {
        &self.vertex.id
    }
}

/// Terminal vertex of a region. Never the source of a transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalState {
    #[serde(flatten)]
    pub vertex: Vertex,
}

impl FinalState {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            vertex: Vertex::new(id, name, VertexType::FinalState),
        }
    }

    pub fn id(&self) -> &str {
        &self.vertex.id
    }
}

/// Boundary of a submachine state, aliasing entry/exit points declared by
/// the referenced submachine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPointReference {
    #[serde(flatten)]
    pub vertex: Vertex,
    #[serde(default)]
    pub entry: Vec<Pseudostate>,
    #[serde(default)]
    pub exit: Vec<Pseudostate>,
}

impl ConnectionPointReference {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            vertex: Vertex::new(id, name, VertexType::Pseudostate),
            entry: Vec::new(),
            exit: Vec::new(),
        }
    }

    pub fn with_entry(mut self, entry: Pseudostate) -> Self {
        self.entry.push(entry);
        self
    }

    pub fn with_exit(mut self, exit: Pseudostate) -> Self {
        self.exit.push(exit);
        self
    }

    pub fn id(&self) -> &str {
        &self.vertex.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specializations_carry_matching_vertex_type() {
        assert_eq!(Pseudostate::initial("p").vertex.vertex_type, VertexType::Pseudostate);
        assert_eq!(FinalState::new("f", "Done").vertex.vertex_type, VertexType::FinalState);
    }

    #[test]
    fn pseudostate_flattens_vertex_fields() {
        let pseudostate = Pseudostate::new("choice1", "Pick", PseudostateKind::Choice);
        let json = serde_json::to_value(&pseudostate).unwrap();

        assert_eq!(json["id"], "choice1");
        assert_eq!(json["type"], "pseudostate");
        assert_eq!(json["kind"], "choice");
    }

    #[test]
    fn connection_point_reference_collects_entries_and_exits() {
        let cpr = ConnectionPointReference::new("cpr", "Boundary")
            .with_entry(Pseudostate::new("in", "", PseudostateKind::EntryPoint))
            .with_exit(Pseudostate::new("out", "", PseudostateKind::ExitPoint));

        assert_eq!(cpr.entry.len(), 1);
        assert_eq!(cpr.exit[0].id(), "out");
    }
}
