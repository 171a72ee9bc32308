//! Leaf value objects: guards, behaviors and triggers.

use serde::{Deserialize, Serialize};

/// Boolean condition, used as a transition guard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub specification: String,
    #[serde(default)]
    pub language: String,
}

impl Constraint {
    pub fn new(id: impl Into<String>, specification: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            specification: specification.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Side-effecting action: a transition effect or a state's entry/exit/do activity.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Behavior {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub specification: String,
    #[serde(default)]
    pub language: String,
}

impl Behavior {
    pub fn new(id: impl Into<String>, specification: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            specification: specification.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Event occurrence that can fire a transition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub id: String,
    pub event: String,
}

impl Trigger {
    pub fn new(id: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            event: event.into(),
        }
    }
}
