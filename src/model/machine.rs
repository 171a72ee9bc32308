//! The root container of a model.

use super::region::Region;
use super::vertex::Pseudostate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateMachine {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub connection_points: Vec<Pseudostate>,
    /// Set when the machine is the method of a behavioral feature.
    #[serde(default)]
    pub is_method: bool,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl StateMachine {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    pub fn with_connection_point(mut self, point: Pseudostate) -> Self {
        self.connection_points.push(point);
        self
    }

    pub fn as_method(mut self) -> Self {
        self.is_method = true;
        self
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn connection_point(&self, id: &str) -> Option<&Pseudostate> {
        self.connection_points.iter().find(|p| p.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PseudostateKind;

    #[test]
    fn connection_point_lookup_by_id() {
        let machine = StateMachine::new("sm", "Machine")
            .with_connection_point(Pseudostate::new("in", "In", PseudostateKind::EntryPoint));

        assert!(machine.connection_point("in").is_some());
        assert!(machine.connection_point("out").is_none());
    }

    #[test]
    fn machine_round_trips_through_json() {
        let machine = StateMachine::new("sm", "Machine")
            .with_region(Region::new("r", "Main"))
            .with_metadata("owner", "billing");

        let json = serde_json::to_string(&machine).unwrap();
        let parsed: StateMachine = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, machine);
    }
}
