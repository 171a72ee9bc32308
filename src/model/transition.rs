//! Transitions between vertices.

use super::behavior::{Behavior, Constraint, Trigger};
use super::kinds::TransitionKind;
use super::vertex::Vertex;
use serde::{Deserialize, Serialize};

/// Directed edge from a source vertex to a target vertex.
///
/// `source` and `target` hold the vertex shape the loader linked; `None`
/// means the loader left the slot empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source: Option<Vertex>,
    #[serde(default)]
    pub target: Option<Vertex>,
    #[serde(default)]
    pub kind: TransitionKind,
    #[serde(default)]
    pub guard: Option<Constraint>,
    #[serde(default)]
    pub effect: Option<Behavior>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
}

impl Transition {
    /// Create an external transition without endpoints.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Create an external transition between two vertices.
    pub fn between(id: impl Into<String>, source: &Vertex, target: &Vertex) -> Self {
        Self::new(id).with_source(source).with_target(target)
    }

    pub fn with_source(mut self, source: &Vertex) -> Self {
        self.source = Some(source.clone());
        self
    }

    pub fn with_target(mut self, target: &Vertex) -> Self {
        self.target = Some(target.clone());
        self
    }

    pub fn with_kind(mut self, kind: TransitionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_guard(mut self, guard: Constraint) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn with_effect(mut self, effect: Behavior) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Source vertex ID, if the slot is filled.
    pub fn source_id(&self) -> Option<&str> {
        self.source.as_ref().map(|v| v.id.as_str())
    }

    /// Target vertex ID, if the slot is filled.
    pub fn target_id(&self) -> Option<&str> {
        self.target.as_ref().map(|v| v.id.as_str())
    }
}
