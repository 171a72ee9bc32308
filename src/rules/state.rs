//! Rules for states: composition flags, submachine semantics and behaviors.

use super::vertex::{expect_vertex_type, validate_vertex};
use super::{is_valid_id, Validate};
use crate::model::{State, StateMachine, VertexType};
use crate::validation::{ErrorKind, ObjectType, ValidationContext, ValidationErrors};

impl Validate for State {
    fn object_type(&self) -> ObjectType {
        ObjectType::State
    }

    fn validate_in<'a>(&'a self, ctx: &ValidationContext<'a>, errors: &mut ValidationErrors) {
        validate_vertex(&self.vertex, ObjectType::State, ctx, errors);
        expect_vertex_type(&self.vertex, VertexType::State, ObjectType::State, ctx, errors);

        self.check_composition(ctx, errors);
        self.check_submachine(ctx, errors);

        let behaviors = [
            ("Entry", &self.entry),
            ("Exit", &self.exit),
            ("DoActivity", &self.do_activity),
        ];
        for (field, behavior) in behaviors {
            if let Some(behavior) = behavior {
                behavior.validate_in(&ctx.with_field(field), errors);
            }
        }

        for (index, region) in self.regions.iter().enumerate() {
            region.validate_in(&ctx.with_index("Regions", index), errors);
        }

        for (index, connection) in self.connections.iter().enumerate() {
            connection.validate_in(&ctx.with_index("Connections", index), errors);
        }

        if self.is_submachine_state {
            if let Some(submachine) = &self.submachine {
                self.resolve_connections(submachine, ctx, errors);
            }
        }
    }
}

impl State {
    fn check_composition(&self, ctx: &ValidationContext<'_>, errors: &mut ValidationErrors) {
        let id = self.id();
        let mut violation = |field: &str, message: String| {
            errors.add(ctx.error(ErrorKind::Constraint, ObjectType::State, field, message));
        };

        if self.is_composite && self.is_simple {
            violation(
                "IsComposite",
                format!("state '{id}' cannot be both simple and composite"),
            );
        }

        if self.is_composite && self.regions.is_empty() {
            violation(
                "Regions",
                format!("composite state '{id}' must own at least one region"),
            );
        }

        if !self.is_composite && !self.regions.is_empty() {
            violation(
                "Regions",
                format!(
                    "non-composite state '{id}' must not own regions, found {}",
                    self.regions.len()
                ),
            );
        }

        if self.is_orthogonal && !self.is_composite {
            violation(
                "IsOrthogonal",
                format!("orthogonal state '{id}' must be composite"),
            );
        }

        if self.is_orthogonal && self.is_composite && self.regions.len() < 2 {
            violation(
                "Regions",
                format!(
                    "orthogonal state '{id}' must own at least two regions, found {}",
                    self.regions.len()
                ),
            );
        }
    }

    fn check_submachine(&self, ctx: &ValidationContext<'_>, errors: &mut ValidationErrors) {
        let id = self.id();
        let mut violation = |field: &str, message: String| {
            errors.add(ctx.error(ErrorKind::Constraint, ObjectType::State, field, message));
        };

        if !self.is_submachine_state {
            if let Some(submachine) = &self.submachine {
                violation(
                    "Submachine",
                    format!(
                        "state '{id}' is not a submachine state but references submachine '{}'",
                        submachine.id
                    ),
                );
            }
            if !self.connections.is_empty() {
                violation(
                    "Connections",
                    format!(
                        "state '{id}' is not a submachine state and cannot have connection point references"
                    ),
                );
            }
            return;
        }

        match &self.submachine {
            None => violation(
                "Submachine",
                format!("submachine state '{id}' must reference a submachine"),
            ),
            Some(submachine) => {
                let enclosing = ctx.state_machine().map(|m| m.id.as_str());
                if is_valid_id(&submachine.id) && enclosing == Some(submachine.id.as_str()) {
                    violation(
                        "Submachine",
                        format!(
                            "state '{id}' references its enclosing state machine '{}' as submachine",
                            submachine.id
                        ),
                    );
                }
            }
        }

        if !self.regions.is_empty() {
            violation(
                "Regions",
                format!("submachine state '{id}' must not own regions"),
            );
        }

        if self.is_composite {
            violation(
                "IsComposite",
                format!("submachine state '{id}' cannot be composite"),
            );
        }
    }

    /// Every entry/exit named by a connection point reference must be a
    /// connection point of the referenced submachine.
    fn resolve_connections(
        &self,
        submachine: &StateMachine,
        ctx: &ValidationContext<'_>,
        errors: &mut ValidationErrors,
    ) {
        for (index, connection) in self.connections.iter().enumerate() {
            let connection_ctx = ctx.with_index("Connections", index);
            let ends = [("Entry", &connection.entry), ("Exit", &connection.exit)];
            for (field, points) in ends {
                for (position, point) in points.iter().enumerate() {
                    if !is_valid_id(point.id()) || submachine.connection_point(point.id()).is_some() {
                        continue;
                    }
                    errors.add(connection_ctx.error(
                        ErrorKind::Reference,
                        ObjectType::ConnectionPointReference,
                        format!("{field}[{position}]"),
                        format!(
                            "{} point '{}' is not a connection point of submachine '{}'",
                            field.to_lowercase(),
                            point.id(),
                            submachine.id
                        ),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Behavior, ConnectionPointReference, Pseudostate, PseudostateKind, Region,
    };
    use std::sync::Arc;

    fn submachine() -> Arc<StateMachine> {
        Arc::new(
            StateMachine::new("sub", "Sub")
                .with_region(Region::new("sub-r", ""))
                .with_connection_point(Pseudostate::new("in", "", PseudostateKind::EntryPoint))
                .with_connection_point(Pseudostate::new("out", "", PseudostateKind::ExitPoint)),
        )
    }

    #[test]
    fn simple_state_with_behaviors_passes() {
        let state = State::new("s", "Busy")
            .with_entry(Behavior::new("b1", "start()"))
            .with_exit(Behavior::new("b2", "stop()"))
            .with_do_activity(Behavior::new("b3", "work()"));

        assert!(state.validate().is_ok());
    }

    #[test]
    fn behavior_errors_report_at_their_field() {
        let state = State::new("s", "").with_do_activity(Behavior::new("b", ""));

        let errors = state.validate().unwrap_err();
        assert_eq!(errors.iter().next().map(|e| e.path.as_str()), Some("DoActivity"));
    }

    #[test]
    fn composite_state_needs_a_region() {
        let mut state = State::new("s", "");
        state.is_simple = false;
        state.is_composite = true;

        let errors = state.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().field, "Regions");
    }

    #[test]
    fn simple_and_composite_are_exclusive() {
        let mut state = State::new("s", "").with_region(Region::new("r", ""));
        state.is_simple = true;

        let errors = state.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().field, "IsComposite");
    }

    #[test]
    fn orthogonal_state_needs_two_regions() {
        let mut state = State::new("s", "").with_region(Region::new("r", ""));
        state.is_orthogonal = true;

        let errors = state.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.iter().next().unwrap().message.contains("at least two regions"));
    }

    #[test]
    fn orthogonal_requires_composite() {
        let mut state = State::new("s", "");
        state.is_orthogonal = true;

        let errors = state.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().field, "IsOrthogonal");
    }

    #[test]
    fn non_composite_state_cannot_own_regions() {
        let mut state = State::new("s", "");
        state.regions.push(Region::new("r", ""));

        let errors = state.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.iter().next().unwrap().message.contains("non-composite"));
    }

    #[test]
    fn submachine_state_resolves_connection_points() {
        let state = State::new("s", "")
            .with_submachine(submachine())
            .with_connection(
                ConnectionPointReference::new("cpr", "")
                    .with_entry(Pseudostate::new("in", "", PseudostateKind::EntryPoint))
                    .with_exit(Pseudostate::new("out", "", PseudostateKind::ExitPoint)),
            );

        assert!(state.validate().is_ok());
    }

    #[test]
    fn unresolved_connection_point_is_a_reference_error() {
        let state = State::new("s", "")
            .with_submachine(submachine())
            .with_connection(
                ConnectionPointReference::new("cpr", "")
                    .with_entry(Pseudostate::new("in", "", PseudostateKind::EntryPoint))
                    .with_entry(Pseudostate::new("side", "", PseudostateKind::EntryPoint)),
            );

        let errors = state.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        let error = errors.iter().next().unwrap();
        assert_eq!(error.kind, ErrorKind::Reference);
        assert_eq!(error.path, "Connections[0]");
        assert_eq!(error.field, "Entry[1]");
        assert!(error.message.contains("'side'"));
    }

    #[test]
    fn submachine_state_without_submachine() {
        let mut state = State::new("s", "");
        state.is_simple = false;
        state.is_submachine_state = true;

        let errors = state.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().field, "Submachine");
    }

    #[test]
    fn submachine_state_cannot_be_composite() {
        let mut state = State::new("s", "")
            .with_region(Region::new("r", ""))
            .with_submachine(submachine());
        state.is_simple = false;

        let errors = state.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["Regions", "IsComposite"]);
    }

    #[test]
    fn plain_state_cannot_reference_submachine_or_connections() {
        let mut state = State::new("s", "").with_connection(
            ConnectionPointReference::new("cpr", "")
                .with_entry(Pseudostate::new("in", "", PseudostateKind::EntryPoint)),
        );
        state.submachine = Some(submachine());

        let errors = state.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["Submachine", "Connections"]);
    }

    #[test]
    fn submachine_cannot_be_the_enclosing_machine() {
        let outer = StateMachine::new("sub", "Outer");
        let state = State::new("s", "").with_submachine(submachine());
        let ctx = ValidationContext::new().with_state_machine(&outer);

        let errors = state.validate_with(&ctx).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.iter().next().unwrap().message.contains("enclosing state machine"));
    }
}
