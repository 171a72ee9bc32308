//! Rules for vertices, pseudostates, final states and connection point references.

use super::{require, Validate};
use crate::model::{
    ConnectionPointReference, FinalState, Pseudostate, PseudostateKind, Vertex, VertexType,
};
use crate::validation::{ErrorKind, ObjectType, ValidationContext, ValidationErrors};

/// Checks on the embedded vertex shape, reported against `object_type`.
pub(super) fn validate_vertex(
    vertex: &Vertex,
    object_type: ObjectType,
    ctx: &ValidationContext<'_>,
    errors: &mut ValidationErrors,
) {
    require(&vertex.id, object_type, "ID", ctx, errors);

    if !vertex.vertex_type.is_known() {
        errors.add(ctx.error(
            ErrorKind::Invalid,
            object_type,
            "Type",
            format!(
                "vertex type '{}' is not one of state, pseudostate, finalstate",
                vertex.vertex_type
            ),
        ));
    }
}

/// A specialization must carry its own type tag.
pub(super) fn expect_vertex_type(
    vertex: &Vertex,
    expected: VertexType,
    object_type: ObjectType,
    ctx: &ValidationContext<'_>,
    errors: &mut ValidationErrors,
) {
    if vertex.vertex_type.is_known() && vertex.vertex_type != expected {
        errors.add(ctx.error(
            ErrorKind::Constraint,
            object_type,
            "Type",
            format!(
                "{object_type} '{}' must have type '{expected}', found '{}'",
                vertex.id, vertex.vertex_type
            ),
        ));
    }
}

impl Validate for Vertex {
    fn object_type(&self) -> ObjectType {
        ObjectType::Vertex
    }

    fn validate_in<'a>(&'a self, ctx: &ValidationContext<'a>, errors: &mut ValidationErrors) {
        validate_vertex(self, ObjectType::Vertex, ctx, errors);
    }
}

impl Validate for Pseudostate {
    fn object_type(&self) -> ObjectType {
        ObjectType::Pseudostate
    }

    fn validate_in<'a>(&'a self, ctx: &ValidationContext<'a>, errors: &mut ValidationErrors) {
        let object_type = ObjectType::Pseudostate;
        validate_vertex(&self.vertex, object_type, ctx, errors);
        expect_vertex_type(&self.vertex, VertexType::Pseudostate, object_type, ctx, errors);

        if !self.kind.is_known() {
            errors.add(ctx.error(
                ErrorKind::Invalid,
                object_type,
                "Kind",
                format!("pseudostate kind '{}' is not recognized", self.kind),
            ));
            return;
        }

        if self.kind.is_history() && ctx.region().is_none() {
            errors.add(ctx.error(
                ErrorKind::Constraint,
                object_type,
                "Kind",
                format!(
                    "{} pseudostate '{}' must be contained in a region",
                    self.kind,
                    self.id()
                ),
            ));
        }

        if self.kind.is_connection_point() {
            if let Some(region) = ctx.region() {
                errors.add(ctx.error(
                    ErrorKind::Constraint,
                    object_type,
                    "Kind",
                    format!(
                        "{} pseudostate '{}' belongs among a state machine's connection points, not in region '{}'",
                        self.kind,
                        self.id(),
                        region.id
                    ),
                ));
            }
        }
    }
}

impl Validate for FinalState {
    fn object_type(&self) -> ObjectType {
        ObjectType::FinalState
    }

    fn validate_in<'a>(&'a self, ctx: &ValidationContext<'a>, errors: &mut ValidationErrors) {
        validate_vertex(&self.vertex, ObjectType::FinalState, ctx, errors);
        expect_vertex_type(
            &self.vertex,
            VertexType::FinalState,
            ObjectType::FinalState,
            ctx,
            errors,
        );
    }
}

impl Validate for ConnectionPointReference {
    fn object_type(&self) -> ObjectType {
        ObjectType::ConnectionPointReference
    }

    fn validate_in<'a>(&'a self, ctx: &ValidationContext<'a>, errors: &mut ValidationErrors) {
        let object_type = ObjectType::ConnectionPointReference;
        validate_vertex(&self.vertex, object_type, ctx, errors);

        if self.entry.is_empty() && self.exit.is_empty() {
            errors.add(ctx.error(
                ErrorKind::Multiplicity,
                object_type,
                "Entry",
                format!(
                    "connection point reference '{}' must reference at least one entry or exit point",
                    self.id()
                ),
            ));
        }

        check_points(&self.entry, "Entry", PseudostateKind::EntryPoint, ctx, errors);
        check_points(&self.exit, "Exit", PseudostateKind::ExitPoint, ctx, errors);
    }
}

fn check_points(
    points: &[Pseudostate],
    field: &str,
    expected: PseudostateKind,
    ctx: &ValidationContext<'_>,
    errors: &mut ValidationErrors,
) {
    for (index, point) in points.iter().enumerate() {
        let point_ctx = ctx.with_index(field, index);
        require(point.id(), ObjectType::Pseudostate, "ID", &point_ctx, errors);

        if !point.kind.is_known() {
            errors.add(point_ctx.error(
                ErrorKind::Invalid,
                ObjectType::Pseudostate,
                "Kind",
                format!("pseudostate kind '{}' is not recognized", point.kind),
            ));
        } else if point.kind != expected {
            errors.add(point_ctx.error(
                ErrorKind::Constraint,
                ObjectType::Pseudostate,
                "Kind",
                format!(
                    "{field} of a connection point reference must be an {expected} pseudostate, found '{}'",
                    point.kind
                ),
            ));
        }
    }
}
