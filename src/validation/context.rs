//! Ancestry threaded through every check.

use crate::model::{Region, StateMachine};
use crate::validation::error::{ErrorKind, ObjectType, ValidationError};
use crate::validation::options::ValidationOptions;
use std::fmt;
use std::sync::Arc;

#[derive(Debug)]
struct PathSegment {
    parent: Option<Arc<PathSegment>>,
    name: String,
    index: Option<usize>,
}

#[derive(Debug)]
struct MetadataEntry {
    parent: Option<Arc<MetadataEntry>>,
    key: String,
    value: String,
}

/// Persistent validation context.
///
/// Every `with_*` method returns a new context and leaves `self` untouched.
/// Path and metadata are parent-linked lists behind `Arc`, so branching
/// calls share the common prefix instead of copying it.
///
/// ```
/// use statewise::validation::ValidationContext;
///
/// let root = ValidationContext::new();
/// let region = root.with_index("Regions", 0);
/// let state = region.with_index("States", 1).with_field("Entry");
///
/// assert_eq!(state.path(), "Regions[0].States[1].Entry");
/// assert_eq!(region.path(), "Regions[0]");
/// assert_eq!(root.path(), "");
/// ```
#[derive(Clone, Default)]
pub struct ValidationContext<'a> {
    state_machine: Option<&'a StateMachine>,
    region: Option<&'a Region>,
    path: Option<Arc<PathSegment>>,
    metadata: Option<Arc<MetadataEntry>>,
    options: Arc<ValidationOptions>,
}

impl<'a> ValidationContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(&self, options: ValidationOptions) -> Self {
        Self {
            options: Arc::new(options),
            ..self.clone()
        }
    }

    /// Enter a state machine. The current region is cleared: regions of an
    /// outer machine do not enclose anything inside this one.
    pub fn with_state_machine(&self, machine: &'a StateMachine) -> Self {
        Self {
            state_machine: Some(machine),
            region: None,
            ..self.clone()
        }
    }

    pub fn with_region(&self, region: &'a Region) -> Self {
        Self {
            region: Some(region),
            ..self.clone()
        }
    }

    /// Extend the path with a field name.
    pub fn with_field(&self, name: impl Into<String>) -> Self {
        self.push_segment(name.into(), None)
    }

    /// Extend the path with an indexed collection element, e.g. `States[2]`.
    pub fn with_index(&self, name: impl Into<String>, index: usize) -> Self {
        self.push_segment(name.into(), Some(index))
    }

    pub fn with_metadata(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            metadata: Some(Arc::new(MetadataEntry {
                parent: self.metadata.clone(),
                key: key.into(),
                value: value.into(),
            })),
            ..self.clone()
        }
    }

    fn push_segment(&self, name: String, index: Option<usize>) -> Self {
        Self {
            path: Some(Arc::new(PathSegment {
                parent: self.path.clone(),
                name,
                index,
            })),
            ..self.clone()
        }
    }

    pub fn state_machine(&self) -> Option<&'a StateMachine> {
        self.state_machine
    }

    pub fn region(&self) -> Option<&'a Region> {
        self.region
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Most recently set value for `key`.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        let mut node = self.metadata.as_deref();
        while let Some(entry) = node {
            if entry.key == key {
                return Some(entry.value.as_str());
            }
            node = entry.parent.as_deref();
        }
        None
    }

    /// Dotted, indexed locator of the current position.
    pub fn path(&self) -> String {
        let mut segments = Vec::new();
        let mut node = self.path.as_deref();
        while let Some(segment) = node {
            segments.push(segment);
            node = segment.parent.as_deref();
        }

        let mut out = String::new();
        for segment in segments.iter().rev() {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(&segment.name);
            if let Some(index) = segment.index {
                out.push_str(&format!("[{index}]"));
            }
        }
        out
    }

    /// Build an error located at the current path.
    pub fn error(
        &self,
        kind: ErrorKind,
        object_type: ObjectType,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> ValidationError {
        ValidationError::new(kind, object_type, field, message).at(self.path())
    }
}

impl fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationContext")
            .field("state_machine", &self.state_machine.map(|m| m.id.as_str()))
            .field("region", &self.region.map(|r| r.id.as_str()))
            .field("path", &self.path())
            .field("options", &self.options)
            .finish()
    }
}
