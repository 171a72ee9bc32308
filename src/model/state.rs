//! States: simple, composite, orthogonal or submachine.

use super::behavior::Behavior;
use super::kinds::VertexType;
use super::machine::StateMachine;
use super::region::Region;
use super::vertex::{ConnectionPointReference, Vertex};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A durable state of a region.
///
/// The `is_*` flags are declared by the loader and checked against the
/// state's contents, not derived from them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(flatten)]
    pub vertex: Vertex,
    #[serde(default)]
    pub is_simple: bool,
    #[serde(default)]
    pub is_composite: bool,
    #[serde(default)]
    pub is_orthogonal: bool,
    #[serde(default)]
    pub is_submachine_state: bool,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub submachine: Option<Arc<StateMachine>>,
    #[serde(default)]
    pub connections: Vec<ConnectionPointReference>,
    #[serde(default)]
    pub entry: Option<Behavior>,
    #[serde(default)]
    pub exit: Option<Behavior>,
    #[serde(default)]
    pub do_activity: Option<Behavior>,
}

impl State {
    /// Create a simple state.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            vertex: Vertex::new(id, name, VertexType::State),
            is_simple: true,
            is_composite: false,
            is_orthogonal: false,
            is_submachine_state: false,
            regions: Vec::new(),
            submachine: None,
            connections: Vec::new(),
            entry: None,
            exit: None,
            do_activity: None,
        }
    }

    /// Add an owned region, marking the state composite (and orthogonal
    /// from the second region on).
    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self.is_simple = false;
        self.is_composite = true;
        self.is_orthogonal = self.regions.len() >= 2;
        self
    }

    /// Turn the state into a reference to an external state machine.
    pub fn with_submachine(mut self, submachine: Arc<StateMachine>) -> Self {
        self.submachine = Some(submachine);
        self.is_submachine_state = true;
        self.is_simple = false;
        self
    }

    pub fn with_connection(mut self, connection: ConnectionPointReference) -> Self {
        self.connections.push(connection);
        self
    }

    pub fn with_entry(mut self, behavior: Behavior) -> Self {
        self.entry = Some(behavior);
        self
    }

    pub fn with_exit(mut self, behavior: Behavior) -> Self {
        self.exit = Some(behavior);
        self
    }

    pub fn with_do_activity(mut self, behavior: Behavior) -> Self {
        self.do_activity = Some(behavior);
        self
    }

    pub fn id(&self) -> &str {
        &self.vertex.id
    }
}
