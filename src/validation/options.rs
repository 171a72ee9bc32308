//! Tunable validation settings.

use serde::{Deserialize, Serialize};

/// Depth ceiling for cycle searches.
pub const DEFAULT_MAX_CYCLE_DEPTH: usize = 100;

/// Settings shared by the entity rules and the structural engine.
///
/// Deserializes with per-field defaults, so hosts can load a partial
/// document:
///
/// ```
/// use statewise::validation::ValidationOptions;
///
/// let options: ValidationOptions = serde_json::from_str(r#"{"bestPractices": true}"#).unwrap();
/// assert!(options.best_practices);
/// assert_eq!(options.max_cycle_depth, 100);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationOptions {
    /// Maximum path length explored when searching for cycles. Searches that
    /// go deeper are reported as cycle-like nesting.
    pub max_cycle_depth: usize,
    /// Also report soft multiplicity rules (at most one deep history and one
    /// terminate pseudostate per region).
    pub best_practices: bool,
}

impl ValidationOptions {
    pub fn with_max_cycle_depth(mut self, depth: usize) -> Self {
        self.max_cycle_depth = depth;
        self
    }

    pub fn with_best_practices(mut self, enabled: bool) -> Self {
        self.best_practices = enabled;
        self
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_cycle_depth: DEFAULT_MAX_CYCLE_DEPTH,
            best_practices: false,
        }
    }
}
