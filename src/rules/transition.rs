//! Rules for transitions.

use super::{require, Validate};
use crate::model::{Transition, TransitionKind};
use crate::validation::{ErrorKind, ObjectType, ValidationContext, ValidationErrors};

impl Validate for Transition {
    fn object_type(&self) -> ObjectType {
        ObjectType::Transition
    }

    fn validate_in<'a>(&'a self, ctx: &ValidationContext<'a>, errors: &mut ValidationErrors) {
        let object_type = ObjectType::Transition;
        require(&self.id, object_type, "ID", ctx, errors);

        for (field, end) in [("Source", &self.source), ("Target", &self.target)] {
            if end.is_none() {
                errors.add(ctx.error(
                    ErrorKind::Required,
                    object_type,
                    field,
                    format!("transition '{}' must have a {}", self.id, field.to_lowercase()),
                ));
            }
        }

        if !self.kind.is_known() {
            errors.add(ctx.error(
                ErrorKind::Invalid,
                object_type,
                "Kind",
                format!(
                    "transition kind '{}' is not one of external, internal, local",
                    self.kind
                ),
            ));
        }

        if self.kind == TransitionKind::Internal {
            if let (Some(source), Some(target)) = (self.source_id(), self.target_id()) {
                if source != target {
                    errors.add(ctx.error(
                        ErrorKind::Constraint,
                        object_type,
                        "Kind",
                        format!(
                            "internal transition '{}' must have the same source and target, found '{source}' -> '{target}'",
                            self.id
                        ),
                    ));
                }
            }
        }

        if let Some(guard) = &self.guard {
            guard.validate_in(&ctx.with_field("Guard"), errors);
        }
        if let Some(effect) = &self.effect {
            effect.validate_in(&ctx.with_field("Effect"), errors);
        }
        for (index, trigger) in self.triggers.iter().enumerate() {
            trigger.validate_in(&ctx.with_index("Triggers", index), errors);
        }
    }
}
