//! End-to-end validation of complete models.

use statewise::model::{
    Behavior, ConnectionPointReference, FinalState, Pseudostate, PseudostateKind, Region, State,
    StateMachine, Transition, Trigger,
};
use statewise::validation::{ErrorKind, ObjectType, ValidationOptions};
use statewise::{validate_model, validate_model_with, Validate};
use std::sync::Arc;

fn door() -> StateMachine {
    let initial = Pseudostate::initial("init");
    let closed = State::new("closed", "Closed");
    let open = State::new("open", "Open").with_entry(Behavior::new("b1", "light.on()"));
    let gone = FinalState::new("gone", "Removed");

    let start = Transition::between("t0", &initial.vertex, &closed.vertex);
    let opening = Transition::between("t1", &closed.vertex, &open.vertex)
        .with_trigger(Trigger::new("tr1", "push"));
    let closing = Transition::between("t2", &open.vertex, &closed.vertex)
        .with_trigger(Trigger::new("tr2", "pull"));
    let removal = Transition::between("t3", &closed.vertex, &gone.vertex);

    StateMachine::new("door", "Door").with_region(
        Region::new("main", "Main")
            .with_vertex(initial)
            .with_state(closed)
            .with_state(open)
            .with_vertex(gone)
            .with_transition(start)
            .with_transition(opening)
            .with_transition(closing)
            .with_transition(removal),
    )
}

#[test]
fn well_formed_model_has_no_errors() {
    assert!(validate_model(&door()).is_ok());
}

#[test]
fn state_missing_from_vertices_is_located_at_its_region() {
    let mut machine = door();
    machine.regions[0].states.push(State::new("S1", "Forgotten"));

    let errors = validate_model(&machine).unwrap_err();
    let error = errors
        .iter()
        .find(|e| e.kind == ErrorKind::Constraint && e.message.contains("'S1'"))
        .expect("missing vertex entry should be reported");

    assert_eq!(error.path, "Regions[0]");
    assert_eq!(error.object_type, ObjectType::Region);
}

#[test]
fn machine_without_regions_reports_one_multiplicity_error() {
    let errors = validate_model(&StateMachine::new("empty", "Empty")).unwrap_err();

    assert_eq!(errors.len(), 1);
    let error = errors.iter().next().unwrap();
    assert_eq!(error.kind, ErrorKind::Multiplicity);
    assert_eq!(error.message, "must have at least one region");
    assert_eq!(errors.count(ErrorKind::Required), 0);
    assert_eq!(errors.count(ErrorKind::Invalid), 0);
}

#[test]
fn findings_from_both_layers_are_merged() {
    let mut machine = door();
    // Entity layer: blank trigger event.
    machine.regions[0].transitions[1].triggers[0].event.clear();
    // Structure layer: a pseudostate reusing a state's ID.
    machine.regions[0] = machine.regions[0]
        .clone()
        .with_vertex(Pseudostate::new("open", "", PseudostateKind::Choice));

    let errors = validate_model(&machine).unwrap_err();

    let required: Vec<_> = errors.by_kind(ErrorKind::Required).iter().cloned().collect();
    assert_eq!(required.len(), 1);
    assert_eq!(required[0].path, "Regions[0].Transitions[1].Triggers[0]");
    assert_eq!(required[0].field, "Event");

    let duplicates = errors
        .iter()
        .filter(|e| e.message.starts_with("duplicate ID 'open'"))
        .count();
    assert_eq!(duplicates, 1);
}

#[test]
fn dangling_transition_target_is_a_reference_error() {
    let mut machine = door();
    let elsewhere = State::new("elsewhere", "Elsewhere");
    machine.regions[0].transitions[3].target = Some(elsewhere.vertex);

    let errors = validate_model(&machine).unwrap_err();
    let references = errors.by_kind(ErrorKind::Reference);

    assert_eq!(references.len(), 1);
    let error = references.iter().next().unwrap();
    assert_eq!(error.path, "Regions[0].Transitions[3]");
    assert_eq!(error.field, "Target");
}

#[test]
fn submachine_states_share_one_definition() {
    let entry = Pseudostate::new("door.in", "In", PseudostateKind::EntryPoint);
    let submachine = Arc::new(door().with_connection_point(entry.clone()));

    let initial = Pseudostate::initial("h.init");
    let first = State::new("h.front", "Front")
        .with_submachine(Arc::clone(&submachine))
        .with_connection(ConnectionPointReference::new("h.front.in", "").with_entry(entry.clone()));
    let second = State::new("h.back", "Back").with_submachine(submachine);
    let start = Transition::between("h.t0", &initial.vertex, &first.vertex);

    let house = StateMachine::new("house", "House").with_region(
        Region::new("h.main", "Main")
            .with_vertex(initial)
            .with_state(first)
            .with_state(second)
            .with_transition(start),
    );

    let result = validate_model(&house);
    assert!(result.is_ok(), "{}", result.unwrap_err());
}

#[test]
fn best_practice_checks_are_opt_in() {
    let mut machine = door();
    for id in ["h1", "h2"] {
        machine.regions[0] = machine.regions[0]
            .clone()
            .with_vertex(Pseudostate::new(id, "", PseudostateKind::DeepHistory));
    }

    assert!(validate_model(&machine).is_ok());

    let strict = ValidationOptions::default().with_best_practices(true);
    let errors = validate_model_with(&machine, &strict).unwrap_err();
    assert_eq!(errors.count(ErrorKind::Multiplicity), 1);
}

#[test]
fn report_groups_findings_by_kind() {
    let mut machine = door();
    machine.regions[0].transitions[0].id.clear();
    machine.regions[0].transitions[2].target = None;

    let errors = machine.validate().unwrap_err();
    let report = errors.report();

    assert!(report.starts_with(&format!("{} validation error", errors.len())));
    assert!(report.contains("Required ("));
    assert!(report.contains("Regions[0].Transitions[0]"));
}

#[test]
fn errors_serialize_for_tooling() {
    let errors = validate_model(&StateMachine::new("empty", "Empty")).unwrap_err();
    let json: serde_json::Value = serde_json::from_str(&errors.to_json().unwrap()).unwrap();

    let first = &json[0];
    assert_eq!(first["kind"], "Multiplicity");
    assert_eq!(first["field"], "Regions");
}
