//! Rules for guards, behaviors and triggers.

use super::{require, Validate};
use crate::model::{Behavior, Constraint, Trigger};
use crate::validation::{ObjectType, ValidationContext, ValidationErrors};

impl Validate for Constraint {
    fn object_type(&self) -> ObjectType {
        ObjectType::Constraint
    }

    fn validate_in<'a>(&'a self, ctx: &ValidationContext<'a>, errors: &mut ValidationErrors) {
        require(&self.id, ObjectType::Constraint, "ID", ctx, errors);
        require(&self.specification, ObjectType::Constraint, "Specification", ctx, errors);
    }
}

impl Validate for Behavior {
    fn object_type(&self) -> ObjectType {
        ObjectType::Behavior
    }

    fn validate_in<'a>(&'a self, ctx: &ValidationContext<'a>, errors: &mut ValidationErrors) {
        require(&self.id, ObjectType::Behavior, "ID", ctx, errors);
        require(&self.specification, ObjectType::Behavior, "Specification", ctx, errors);
    }
}

impl Validate for Trigger {
    fn object_type(&self) -> ObjectType {
        ObjectType::Trigger
    }

    fn validate_in<'a>(&'a self, ctx: &ValidationContext<'a>, errors: &mut ValidationErrors) {
        require(&self.id, ObjectType::Trigger, "ID", ctx, errors);
        require(&self.event, ObjectType::Trigger, "Event", ctx, errors);
    }
}
