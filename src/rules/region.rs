//! Rules for regions: vertex bookkeeping, multiplicities and transition scope.

use super::{is_valid_id, require, Validate};
use crate::model::{PseudostateKind, Region, RegionVertex, Transition, TransitionKind, VertexType};
use crate::validation::{ErrorKind, ObjectType, ValidationContext, ValidationErrors};
use std::collections::HashSet;

impl Validate for Region {
    fn object_type(&self) -> ObjectType {
        ObjectType::Region
    }

    fn validate_in<'a>(&'a self, ctx: &ValidationContext<'a>, errors: &mut ValidationErrors) {
        let ctx = ctx.with_region(self);
        require(&self.id, ObjectType::Region, "ID", &ctx, errors);

        for (index, vertex) in self.vertices.iter().enumerate() {
            let vertex_ctx = ctx.with_index("Vertices", index);
            match vertex {
                RegionVertex::Vertex(vertex) => vertex.validate_in(&vertex_ctx, errors),
                RegionVertex::Pseudostate(pseudostate) => {
                    pseudostate.validate_in(&vertex_ctx, errors)
                }
                RegionVertex::FinalState(final_state) => {
                    final_state.validate_in(&vertex_ctx, errors)
                }
            }
        }

        self.check_pseudostate_multiplicity(&ctx, errors);

        let vertex_ids: HashSet<&str> = self.vertices.iter().map(|v| v.id()).collect();
        for (index, state) in self.states.iter().enumerate() {
            if is_valid_id(state.id()) && !vertex_ids.contains(state.id()) {
                errors.add(ctx.error(
                    ErrorKind::Constraint,
                    ObjectType::Region,
                    "Vertices",
                    format!(
                        "state '{}' is not listed in the vertices of region '{}'",
                        state.id(),
                        self.id
                    ),
                ));
            }
            state.validate_in(&ctx.with_index("States", index), errors);
        }

        for (index, transition) in self.transitions.iter().enumerate() {
            let transition_ctx = ctx.with_index("Transitions", index);
            transition.validate_in(&transition_ctx, errors);
            self.check_transition_scope(transition, &transition_ctx, errors);
        }

        self.check_initial_transitions(&ctx, errors);
    }
}

impl Region {
    fn is_member(&self, id: &str) -> bool {
        self.vertex(id).is_some() || self.state(id).is_some()
    }

    fn check_pseudostate_multiplicity(
        &self,
        ctx: &ValidationContext<'_>,
        errors: &mut ValidationErrors,
    ) {
        let initials = self.pseudostate_indices(&PseudostateKind::Initial);
        if initials.len() > 1 {
            errors.add(ctx.error(
                ErrorKind::Multiplicity,
                ObjectType::Region,
                "Vertices",
                format!(
                    "region '{}' has {} initial pseudostates at indices {:?}; at most one is allowed",
                    self.id,
                    initials.len(),
                    initials
                ),
            ));
        }

        if !ctx.options().best_practices {
            return;
        }
        for kind in [PseudostateKind::DeepHistory, PseudostateKind::Terminate] {
            let found = self.pseudostate_indices(&kind);
            if found.len() > 1 {
                errors.add(ctx.error(
                    ErrorKind::Multiplicity,
                    ObjectType::Region,
                    "Vertices",
                    format!(
                        "region '{}' has {} {kind} pseudostates at indices {:?}; at most one is recommended",
                        self.id,
                        found.len(),
                        found
                    ),
                ));
            }
        }
    }

    /// Endpoints must belong to this region; final states never start a
    /// transition; local transitions leave a composite state.
    fn check_transition_scope(
        &self,
        transition: &Transition,
        ctx: &ValidationContext<'_>,
        errors: &mut ValidationErrors,
    ) {
        let object_type = ObjectType::Transition;

        for (field, end) in [("Source", &transition.source), ("Target", &transition.target)] {
            let Some(vertex) = end else { continue };
            if is_valid_id(&vertex.id) && !self.is_member(&vertex.id) {
                errors.add(ctx.error(
                    ErrorKind::Constraint,
                    object_type,
                    field,
                    format!(
                        "{} vertex '{}' is not a member of region '{}'",
                        field.to_lowercase(),
                        vertex.id,
                        self.id
                    ),
                ));
            }
        }

        let Some(source) = &transition.source else {
            return;
        };

        let source_is_final = source.vertex_type == VertexType::FinalState
            || self.vertex(&source.id).is_some_and(RegionVertex::is_final_state);
        if source_is_final {
            errors.add(ctx.error(
                ErrorKind::Constraint,
                object_type,
                "Source",
                format!(
                    "final state '{}' cannot be the source of transition '{}'",
                    source.id, transition.id
                ),
            ));
        }

        if transition.kind == TransitionKind::Local {
            if let Some(state) = self.state(&source.id) {
                if !state.is_composite {
                    errors.add(ctx.error(
                        ErrorKind::Constraint,
                        object_type,
                        "Kind",
                        format!(
                            "local transition '{}' requires a composite source state, '{}' is not composite",
                            transition.id, source.id
                        ),
                    ));
                }
            }
        }
    }

    /// Initial pseudostates have no incoming and at most one outgoing transition.
    fn check_initial_transitions(&self, ctx: &ValidationContext<'_>, errors: &mut ValidationErrors) {
        for index in self.pseudostate_indices(&PseudostateKind::Initial) {
            let id = self.vertices[index].id();
            if !is_valid_id(id) {
                continue;
            }

            let incoming = self
                .transitions
                .iter()
                .filter(|t| t.target_id() == Some(id))
                .count();
            if incoming > 0 {
                errors.add(ctx.error(
                    ErrorKind::Constraint,
                    ObjectType::Region,
                    "Transitions",
                    format!("initial pseudostate '{id}' cannot be the target of a transition"),
                ));
            }

            let outgoing = self
                .transitions
                .iter()
                .filter(|t| t.source_id() == Some(id))
                .count();
            if outgoing > 1 {
                errors.add(ctx.error(
                    ErrorKind::Multiplicity,
                    ObjectType::Region,
                    "Transitions",
                    format!(
                        "initial pseudostate '{id}' has {outgoing} outgoing transitions; at most one is allowed"
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FinalState, Pseudostate, State};
    use crate::validation::ValidationOptions;

    fn basic_region() -> Region {
        let initial = Pseudostate::initial("init");
        let idle = State::new("idle", "Idle");
        let done = FinalState::new("done", "Done");
        let start = Transition::between("t1", &initial.vertex, &idle.vertex);
        let finish = Transition::between("t2", &idle.vertex, &done.vertex);

        Region::new("main", "Main")
            .with_vertex(initial)
            .with_state(idle)
            .with_vertex(done)
            .with_transition(start)
            .with_transition(finish)
    }

    #[test]
    fn well_formed_region_passes() {
        assert!(basic_region().validate().is_ok());
    }

    #[test]
    fn two_initial_pseudostates_are_a_multiplicity_error() {
        let region = basic_region().with_vertex(Pseudostate::initial("init2"));

        let errors = region.validate().unwrap_err();
        let multiplicity = errors.by_kind(ErrorKind::Multiplicity);
        assert_eq!(multiplicity.len(), 1);
        let message = &multiplicity.iter().next().unwrap().message;
        assert!(message.contains("2 initial pseudostates"));
        assert!(message.contains("[0, 3]"));
    }

    #[test]
    fn state_missing_from_vertices_is_reported() {
        let mut region = basic_region();
        region.states.push(State::new("orphan", "Orphan"));

        let errors = region.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        let error = errors.iter().next().unwrap();
        assert_eq!(error.kind, ErrorKind::Constraint);
        assert!(error.message.contains("'orphan'"));
    }

    #[test]
    fn transition_endpoints_must_be_members() {
        let stranger = State::new("elsewhere", "");
        let region =
            basic_region().with_transition(Transition::between("t3", &stranger.vertex, &stranger.vertex));

        let errors = region.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.path == "Transitions[2]"));
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["Source", "Target"]);
    }

    #[test]
    fn final_state_cannot_be_a_source() {
        let done = FinalState::new("done", "Done");
        let idle = State::new("idle", "Idle");
        let region = basic_region().with_transition(Transition::between("t3", &done.vertex, &idle.vertex));

        let errors = region.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.iter().next().unwrap().message.contains("final state 'done'"));
    }

    #[test]
    fn internal_self_transition_in_region_passes() {
        let idle = State::new("idle", "Idle");
        let region = basic_region().with_transition(
            Transition::between("t3", &idle.vertex, &idle.vertex).with_kind(TransitionKind::Internal),
        );

        assert!(region.validate().is_ok());
    }

    #[test]
    fn local_transition_needs_composite_source() {
        let idle = State::new("idle", "Idle");
        let region = basic_region().with_transition(
            Transition::between("t3", &idle.vertex, &idle.vertex).with_kind(TransitionKind::Local),
        );

        let errors = region.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().field, "Kind");
    }

    #[test]
    fn initial_pseudostate_transition_rules() {
        let initial = Pseudostate::initial("init");
        let idle = State::new("idle", "Idle");
        let region = basic_region()
            .with_transition(Transition::between("t3", &initial.vertex, &idle.vertex))
            .with_transition(Transition::between("t4", &idle.vertex, &initial.vertex));

        let errors = region.validate().unwrap_err();
        assert_eq!(errors.count(ErrorKind::Constraint), 1);
        assert_eq!(errors.count(ErrorKind::Multiplicity), 1);
    }

    #[test]
    fn best_practice_multiplicities_are_opt_in() {
        let region = basic_region()
            .with_vertex(Pseudostate::new("h1", "", PseudostateKind::DeepHistory))
            .with_vertex(Pseudostate::new("h2", "", PseudostateKind::DeepHistory));

        assert!(region.validate().is_ok());

        let strict = ValidationOptions::default().with_best_practices(true);
        let errors = region.validate_with_options(strict).unwrap_err();
        assert_eq!(errors.count(ErrorKind::Multiplicity), 1);
        assert!(errors.iter().next().unwrap().message.contains("deepHistory"));
    }

    #[test]
    fn nested_state_errors_are_path_qualified() {
        let mut region = basic_region();
        region.states[0].entry = Some(crate::model::Behavior::new("b", ""));

        let errors = region.validate().unwrap_err();
        assert_eq!(errors.iter().next().map(|e| e.path.as_str()), Some("States[0].Entry"));
    }
}
