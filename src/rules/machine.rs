//! Rules for state machines.

use super::{require, Validate};
use crate::model::StateMachine;
use crate::validation::{ErrorKind, ObjectType, ValidationContext, ValidationErrors};

impl Validate for StateMachine {
    fn object_type(&self) -> ObjectType {
        ObjectType::StateMachine
    }

    fn validate_in<'a>(&'a self, ctx: &ValidationContext<'a>, errors: &mut ValidationErrors) {
        let ctx = ctx.with_state_machine(self);
        let object_type = ObjectType::StateMachine;
        require(&self.id, object_type, "ID", &ctx, errors);

        if self.regions.is_empty() {
            errors.add(ctx.error(
                ErrorKind::Multiplicity,
                object_type,
                "Regions",
                "must have at least one region",
            ));
        }

        if self.is_method && !self.connection_points.is_empty() {
            errors.add(ctx.error(
                ErrorKind::Constraint,
                object_type,
                "ConnectionPoints",
                format!(
                    "method state machine '{}' must not have connection points, found {}",
                    self.id,
                    self.connection_points.len()
                ),
            ));
        }

        for (index, point) in self.connection_points.iter().enumerate() {
            let point_ctx = ctx.with_index("ConnectionPoints", index);
            if point.kind.is_known() && !point.kind.is_connection_point() {
                errors.add(point_ctx.error(
                    ErrorKind::Constraint,
                    ObjectType::Pseudostate,
                    "Kind",
                    format!(
                        "connection point '{}' must be an entryPoint or exitPoint, found '{}'",
                        point.id(),
                        point.kind
                    ),
                ));
            }
            point.validate_in(&point_ctx, errors);
        }

        for (index, region) in self.regions.iter().enumerate() {
            region.validate_in(&ctx.with_index("Regions", index), errors);
        }
    }
}
