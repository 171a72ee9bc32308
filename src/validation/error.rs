//! Validation errors and the accumulating error collection.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Category of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ErrorKind {
    /// A mandatory field is missing or empty.
    Required,
    /// A value lies outside its enumerated domain.
    Invalid,
    /// A semantic or structural rule is violated.
    Constraint,
    /// A reference dangles or a required reference slot is empty.
    Reference,
    /// A cardinality is out of range.
    Multiplicity,
}

impl ErrorKind {
    /// All kinds, in report order.
    pub const ALL: [ErrorKind; 5] = [
        ErrorKind::Required,
        ErrorKind::Invalid,
        ErrorKind::Constraint,
        ErrorKind::Reference,
        ErrorKind::Multiplicity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::Invalid => "Invalid",
            Self::Constraint => "Constraint",
            Self::Reference => "Reference",
            Self::Multiplicity => "Multiplicity",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model entity an error is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectType {
    StateMachine,
    Region,
    Vertex,
    State,
    Pseudostate,
    FinalState,
    Transition,
    ConnectionPointReference,
    Constraint,
    Behavior,
    Trigger,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StateMachine => "StateMachine",
            Self::Region => "Region",
            Self::Vertex => "Vertex",
            Self::State => "State",
            Self::Pseudostate => "Pseudostate",
            Self::FinalState => "FinalState",
            Self::Transition => "Transition",
            Self::ConnectionPointReference => "ConnectionPointReference",
            Self::Constraint => "Constraint",
            Self::Behavior => "Behavior",
            Self::Trigger => "Trigger",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single, located validation finding.
///
/// `path` locates the offending object from the validation root, e.g.
/// `Regions[0].States[1].Entry`; `field` names the attribute on that object.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind} error on {object_type}.{field}{}: {message}", location(.path))]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub object_type: ObjectType,
    pub field: String,
    pub message: String,
    pub path: String,
}

fn location(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" at {path}")
    }
}

impl ValidationError {
    pub fn new(
        kind: ErrorKind,
        object_type: ObjectType,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            object_type,
            field: field.into(),
            message: message.into(),
            path: String::new(),
        }
    }

    /// Attach the locator path.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

/// Append-only, order-preserving collection of validation errors.
///
/// Order follows traversal order, so two runs over the same model produce
/// the same collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Append every error of `other`, keeping its order.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn by_kind(&self, kind: ErrorKind) -> ValidationErrors {
        self.filter(|e| e.kind == kind)
    }

    pub fn by_object_type(&self, object_type: ObjectType) -> ValidationErrors {
        self.filter(|e| e.object_type == object_type)
    }

    /// Errors located at `prefix` or anywhere below it.
    ///
    /// Matching is segment-aware: `Regions[1]` does not match `Regions[10]`.
    pub fn by_path_prefix(&self, prefix: &str) -> ValidationErrors {
        self.filter(|e| path_has_prefix(&e.path, prefix))
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }

    /// Number of errors per kind; kinds without errors are omitted.
    pub fn summary(&self) -> BTreeMap<ErrorKind, usize> {
        let mut summary = BTreeMap::new();
        for error in &self.errors {
            *summary.entry(error.kind).or_insert(0) += 1;
        }
        summary
    }

    /// Human-readable multi-line report grouped by kind.
    pub fn report(&self) -> String {
        if self.errors.is_empty() {
            return "no validation errors".to_string();
        }

        let mut out = format!("{} validation error(s)", self.errors.len());
        for kind in ErrorKind::ALL {
            let group: Vec<&ValidationError> =
                self.errors.iter().filter(|e| e.kind == kind).collect();
            if group.is_empty() {
                continue;
            }
            out.push_str(&format!("\n{kind} ({}):", group.len()));
            for error in group {
                let path = if error.path.is_empty() {
                    "<root>"
                } else {
                    error.path.as_str()
                };
                out.push_str(&format!(
                    "\n  - {path}: {}.{}: {}",
                    error.object_type, error.field, error.message
                ));
            }
        }
        out
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Convert into an accumulated `Validation`, failing with every error.
    pub fn into_validation(self) -> Validation<(), NonEmptyVec<ValidationError>> {
        let checks: Vec<Validation<(), NonEmptyVec<ValidationError>>> =
            self.errors.into_iter().map(|e| Validation::fail(e)).collect();
        Validation::all_vec(checks).map(|_| ())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn filter<F>(&self, predicate: F) -> ValidationErrors
    where
        F: Fn(&ValidationError) -> bool,
    {
        self.errors
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }
}

fn path_has_prefix(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}

impl std::error::Error for ValidationErrors {}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
