//! Three-pass structural validator.

use super::compat::{can_contain, may_inherit, may_reference};
use super::cycle::{find_path, CycleSearch};
use super::element::Element;
use super::graph::Adjacency;
use crate::model::{StateMachine, Vertex};
use crate::rules::is_valid_id;
use crate::validation::{
    ErrorKind, ObjectType, ValidationContext, ValidationError, ValidationErrors,
    ValidationOptions,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// A reference recorded while walking, checked in the resolve pass.
#[derive(Debug)]
struct Reference<'a> {
    owner: ObjectType,
    field: String,
    /// `None` is an empty slot that should hold a reference.
    target: Option<&'a str>,
    path: String,
}

/// How an element is held by its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Member,
    /// Listed in a state machine's `ConnectionPoints`.
    MachinePoint,
    /// Entry or exit of a connection point reference.
    ReferencePoint,
}

impl Role {
    fn is_point(self) -> bool {
        matches!(self, Self::MachinePoint | Self::ReferencePoint)
    }
}

/// Where an element was first registered.
#[derive(Clone, Copy, Debug)]
struct Placement<'a> {
    parent: Option<&'a str>,
    role: Role,
}

/// Graph label used in cycle messages and for de-duplicating findings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Relation {
    Containment,
    Submachine,
}

impl Relation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Containment => "containment",
            Self::Submachine => "submachine",
        }
    }
}

/// Structural integrity checker for one model graph.
///
/// The validator accumulates ID and edge maps while walking, so one
/// instance serves exactly one call: [`run`](Self::run) consumes it.
///
/// ```
/// use statewise::model::{Pseudostate, Region, State, StateMachine, Transition};
/// use statewise::structure::StructureValidator;
///
/// let initial = Pseudostate::initial("init");
/// let idle = State::new("idle", "Idle");
/// let start = Transition::between("t1", &initial.vertex, &idle.vertex);
/// let machine = StateMachine::new("sm", "Machine").with_region(
///     Region::new("main", "Main")
///         .with_vertex(initial)
///         .with_state(idle)
///         .with_transition(start),
/// );
///
/// assert!(StructureValidator::new().run(&machine).is_empty());
/// ```
#[derive(Debug, Default)]
pub struct StructureValidator<'a> {
    options: ValidationOptions,
    objects: HashMap<&'a str, Element<'a>>,
    locations: HashMap<&'a str, String>,
    placements: HashMap<&'a str, Placement<'a>>,
    /// States whose bookkeeping vertex has already been matched.
    claimed_entries: HashSet<&'a str>,
    /// Bookkeeping vertices of states rejected as duplicates.
    rejected_entries: Vec<(Option<&'a str>, &'a Vertex)>,
    references: Vec<Reference<'a>>,
    containment: Adjacency<'a>,
    inheritance: Adjacency<'a>,
    bidirectional: Adjacency<'a>,
    reported_cycles: HashSet<(Relation, Vec<&'a str>)>,
    errors: ValidationErrors,
}

impl<'a> StructureValidator<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the graph reachable from `root`.
    pub fn run(self, root: impl Into<Element<'a>>) -> ValidationErrors {
        self.run_in(root, &ValidationContext::new())
    }

    /// Validate the graph reachable from `root`, locating findings below
    /// the path of `ctx`.
    pub fn run_in(
        mut self,
        root: impl Into<Element<'a>>,
        ctx: &ValidationContext<'_>,
    ) -> ValidationErrors {
        let root = root.into();

        self.build(root, ctx);
        debug!(
            root = root.id(),
            objects = self.objects.len(),
            references = self.references.len(),
            containment = self.containment.len(),
            inheritance = self.inheritance.len(),
            bidirectional = self.bidirectional.len(),
            errors = self.errors.len(),
            "structure graph built"
        );

        self.resolve();
        debug!(errors = self.errors.len(), "references resolved");

        self.check_bidirectional();
        self.check_containment();
        self.check_inheritance();
        debug!(
            root = root.id(),
            errors = self.errors.len(),
            "structure validation finished"
        );

        self.errors
    }

    // Pass 1: build

    fn build(&mut self, root: Element<'a>, ctx: &ValidationContext<'_>) {
        let placement = Placement {
            parent: None,
            role: Role::Member,
        };
        self.register(root, placement, ctx);
    }

    fn register(
        &mut self,
        element: Element<'a>,
        placement: Placement<'a>,
        ctx: &ValidationContext<'_>,
    ) {
        let id = element.id();
        let object_type = element.object_type();

        if !is_valid_id(id) {
            self.errors.add(ctx.error(
                ErrorKind::Required,
                object_type,
                "ID",
                format!("{object_type} without an ID cannot be placed in the model graph"),
            ));
            self.descend(element, None, ctx);
            return;
        }

        if let Some(&existing) = self.objects.get(id) {
            if !self.is_alias(existing, element, placement)
                && !self.is_rejected_entry(element, placement)
            {
                if let Element::State(state) = element {
                    self.rejected_entries.push((placement.parent, &state.vertex));
                }
                let first_type = existing.object_type();
                let first_path = display_path(self.locations.get(id).map(String::as_str));
                trace!(
                    id,
                    object_type = %object_type,
                    first = %first_path,
                    path = %ctx.path(),
                    "duplicate element ID"
                );
                self.errors.add(ctx.error(
                    ErrorKind::Constraint,
                    object_type,
                    "ID",
                    format!("duplicate ID '{id}': already used by {first_type} at {first_path}"),
                ));
            }
            return;
        }

        self.objects.insert(id, element);
        self.locations.insert(id, ctx.path());
        self.placements.insert(id, placement);
        self.descend(element, Some(id), ctx);
    }

    fn descend(&mut self, element: Element<'a>, id: Option<&'a str>, ctx: &ValidationContext<'_>) {
        let owner = element.object_type();

        match element {
            Element::StateMachine(machine) => {
                for (index, region) in machine.regions.iter().enumerate() {
                    self.contain(id, owner, region.into(), ctx, "Regions", index);
                }
                for (index, point) in machine.connection_points.iter().enumerate() {
                    self.contain_as(
                        Role::MachinePoint,
                        id,
                        owner,
                        point.into(),
                        ctx,
                        "ConnectionPoints",
                        index,
                    );
                }
            }
            Element::Region(region) => {
                for (index, state) in region.states.iter().enumerate() {
                    self.contain(id, owner, state.into(), ctx, "States", index);
                }
                for (index, vertex) in region.vertices.iter().enumerate() {
                    self.contain(id, owner, vertex.into(), ctx, "Vertices", index);
                }
                for (index, transition) in region.transitions.iter().enumerate() {
                    self.contain(id, owner, transition.into(), ctx, "Transitions", index);
                }
            }
            Element::State(state) => {
                for (index, region) in state.regions.iter().enumerate() {
                    self.contain(id, owner, region.into(), ctx, "Regions", index);
                }
                for (index, connection) in state.connections.iter().enumerate() {
                    self.contain(id, owner, connection.into(), ctx, "Connections", index);
                }
                match state.submachine.as_deref() {
                    Some(submachine) => self.inherit(id, submachine, ctx),
                    None if state.is_submachine_state => {
                        self.references.push(Reference {
                            owner,
                            field: "Submachine".to_string(),
                            target: None,
                            path: ctx.path(),
                        });
                    }
                    None => {}
                }
            }
            Element::ConnectionPointReference(connection) => {
                let points = connection
                    .entry
                    .iter()
                    .enumerate()
                    .map(|(index, point)| ("Entry", index, point))
                    .chain(
                        connection
                            .exit
                            .iter()
                            .enumerate()
                            .map(|(index, point)| ("Exit", index, point)),
                    );
                for (field, index, point) in points {
                    if let Some(id) = id {
                        if is_valid_id(point.id()) {
                            self.bidirectional.insert_both(id, point.id());
                        }
                    }
                    self.contain_as(Role::ReferencePoint, id, owner, point.into(), ctx, field, index);
                }
            }
            Element::Transition(transition) => {
                let ends = [("Source", &transition.source), ("Target", &transition.target)];
                for (field, end) in ends {
                    match end {
                        None => self.references.push(Reference {
                            owner,
                            field: field.to_string(),
                            target: None,
                            path: ctx.path(),
                        }),
                        Some(vertex) if is_valid_id(&vertex.id) => {
                            self.references.push(Reference {
                                owner,
                                field: field.to_string(),
                                target: Some(vertex.id.as_str()),
                                path: ctx.path(),
                            })
                        }
                        // Blank endpoint IDs are reported by the entity rules.
                        Some(_) => {}
                    }
                }
                if let (Some(source), Some(target)) = (transition.source_id(), transition.target_id())
                {
                    if is_valid_id(source) && is_valid_id(target) {
                        self.bidirectional.insert_both(source, target);
                    }
                }
            }
            Element::Vertex(_) | Element::Pseudostate(_) | Element::FinalState(_) => {}
        }
    }

    /// Record `parent -> child` and walk the child.
    fn contain(
        &mut self,
        parent: Option<&'a str>,
        owner: ObjectType,
        child: Element<'a>,
        ctx: &ValidationContext<'_>,
        field: &str,
        index: usize,
    ) {
        self.contain_as(Role::Member, parent, owner, child, ctx, field, index);
    }

    #[allow(clippy::too_many_arguments)]
    fn contain_as(
        &mut self,
        role: Role,
        parent: Option<&'a str>,
        owner: ObjectType,
        child: Element<'a>,
        ctx: &ValidationContext<'_>,
        field: &str,
        index: usize,
    ) {
        let child_id = child.id();
        if let Some(parent) = parent {
            if is_valid_id(child_id) {
                self.containment.insert(parent, child_id);
                self.references.push(Reference {
                    owner,
                    field: format!("{field}[{index}]"),
                    target: Some(child_id),
                    path: ctx.path(),
                });
            }
        }
        self.register(child, Placement { parent, role }, &ctx.with_index(field, index));
    }

    /// Record `state -> submachine` and walk the submachine.
    fn inherit(
        &mut self,
        state: Option<&'a str>,
        submachine: &'a StateMachine,
        ctx: &ValidationContext<'_>,
    ) {
        if let Some(state) = state {
            if is_valid_id(&submachine.id) {
                self.inheritance.insert(state, &submachine.id);
                self.references.push(Reference {
                    owner: ObjectType::State,
                    field: "Submachine".to_string(),
                    target: Some(submachine.id.as_str()),
                    path: ctx.path(),
                });
            }
        }
        let placement = Placement {
            parent: state,
            role: Role::Member,
        };
        self.register(submachine.into(), placement, &ctx.with_field("Submachine"));
    }

    /// Whether a second encounter of a registered ID is the same element.
    ///
    /// Besides the same instance reached twice (a shared submachine), two
    /// encounters are legitimate: a state and its bookkeeping vertex in the
    /// same region, once per state, and a connection point together with an
    /// equal entry or exit of a connection point reference.
    fn is_alias(
        &mut self,
        existing: Element<'a>,
        element: Element<'a>,
        placement: Placement<'a>,
    ) -> bool {
        if existing.is_same_instance(&element) {
            return true;
        }
        let id = element.id();
        let Some(first) = self.placements.get(id).copied() else {
            return false;
        };

        match (existing, element) {
            (Element::Pseudostate(a), Element::Pseudostate(b)) => {
                a == b
                    && first.role.is_point()
                    && placement.role.is_point()
                    && (first.role == Role::ReferencePoint || placement.role == Role::ReferencePoint)
            }
            (Element::State(_), Element::Vertex(_)) | (Element::Vertex(_), Element::State(_)) => {
                existing.is_state_entry_pair(&element)
                    && first.parent == placement.parent
                    && self.claimed_entries.insert(id)
            }
            _ => false,
        }
    }

    /// The bookkeeping vertex of a state already reported as a duplicate.
    fn is_rejected_entry(&mut self, element: Element<'a>, placement: Placement<'a>) -> bool {
        let Element::Vertex(vertex) = element else {
            return false;
        };
        let found = self
            .rejected_entries
            .iter()
            .position(|&(parent, entry)| parent == placement.parent && entry == vertex);
        match found {
            Some(index) => {
                self.rejected_entries.swap_remove(index);
                true
            }
            None => false,
        }
    }

    // Pass 2: resolve

    fn resolve(&mut self) {
        for reference in &self.references {
            let message = match reference.target {
                None => format!("{} is not set", reference.field),
                Some(target) if !self.objects.contains_key(target) => {
                    format!("{} references unknown ID '{target}'", reference.field)
                }
                Some(_) => continue,
            };
            trace!(
                field = %reference.field,
                path = %reference.path,
                "unresolved reference"
            );
            self.errors.add(
                ValidationError::new(
                    ErrorKind::Reference,
                    reference.owner,
                    reference.field.clone(),
                    message,
                )
                .at(reference.path.clone()),
            );
        }
    }

    // Pass 3: integrity

    fn check_bidirectional(&mut self) {
        let edges = self.bidirectional.edges().to_vec();
        for (from, to) in edges {
            let from_type = self.object_type_of(from);

            if !self.bidirectional.contains(to, from) {
                self.add_at(
                    from,
                    ErrorKind::Constraint,
                    from_type,
                    "References",
                    format!("reference from '{from}' to '{to}' has no matching back-reference"),
                );
            }

            let (Some(source), Some(target)) = (self.objects.get(from), self.objects.get(to))
            else {
                continue;
            };
            let target_type = target.object_type();
            if !may_reference(source.object_type(), target_type) {
                self.add_at(
                    from,
                    ErrorKind::Constraint,
                    from_type,
                    "References",
                    format!("{from_type} '{from}' cannot reference {target_type} '{to}'"),
                );
            }
        }
    }

    fn check_containment(&mut self) {
        let edges = self.containment.edges().to_vec();
        for (parent, child) in edges {
            if let (Some(owner), Some(owned)) = (self.objects.get(parent), self.objects.get(child))
            {
                let (parent_type, child_type) = (owner.object_type(), owned.object_type());
                if !can_contain(parent_type, child_type) {
                    self.add_at(
                        parent,
                        ErrorKind::Constraint,
                        parent_type,
                        "Containment",
                        format!("{parent_type} '{parent}' cannot contain {child_type} '{child}'"),
                    );
                }
            }

            let containment = &self.containment;
            let search = find_path(child, parent, self.options.max_cycle_depth, |node| {
                containment.successors(node).to_vec()
            });
            self.report_search(Relation::Containment, parent, search);
        }
    }

    fn check_inheritance(&mut self) {
        let edges = self.inheritance.edges().to_vec();
        for (state, submachine) in edges {
            if let (Some(child), Some(parent)) = (self.objects.get(state), self.objects.get(submachine))
            {
                let (child_type, parent_type) = (child.object_type(), parent.object_type());
                if !may_inherit(child_type, parent_type) {
                    self.add_at(
                        state,
                        ErrorKind::Constraint,
                        child_type,
                        "Submachine",
                        format!(
                            "{child_type} '{state}' cannot use {parent_type} '{submachine}' as a submachine"
                        ),
                    );
                }
            }

            let (containment, inheritance) = (&self.containment, &self.inheritance);
            let search = find_path(submachine, state, self.options.max_cycle_depth, |node| {
                containment
                    .successors(node)
                    .iter()
                    .chain(inheritance.successors(node))
                    .copied()
                    .collect()
            });
            self.report_search(Relation::Submachine, state, search);
        }
    }

    /// Report a search that started below `anchor` and looked for a way
    /// back to it.
    fn report_search(&mut self, relation: Relation, anchor: &'a str, search: CycleSearch<'a>) {
        let object_type = self.object_type_of(anchor);
        let field = match relation {
            Relation::Containment => "Containment",
            Relation::Submachine => "Submachine",
        };

        match search {
            CycleSearch::Clear => {}
            CycleSearch::Found(path) => {
                let mut cycle = Vec::with_capacity(path.len() + 1);
                cycle.push(anchor);
                cycle.extend(path);

                if !self.reported_cycles.insert((relation, canonical(&cycle))) {
                    return;
                }
                let rendered = cycle.join(" -> ");
                trace!(relation = relation.as_str(), cycle = %rendered, "cycle detected");
                self.add_at(
                    anchor,
                    ErrorKind::Constraint,
                    object_type,
                    field,
                    format!("{} cycle detected: {rendered}", relation.as_str()),
                );
            }
            CycleSearch::TooDeep(path) => {
                let rendered = path.join(" -> ");
                trace!(relation = relation.as_str(), path = %rendered, "cycle search depth exceeded");
                self.add_at(
                    anchor,
                    ErrorKind::Constraint,
                    object_type,
                    field,
                    format!(
                        "{} nesting below '{anchor}' exceeds {} levels, treating it as cycle-like: {rendered}",
                        relation.as_str(),
                        self.options.max_cycle_depth
                    ),
                );
            }
        }
    }

    fn object_type_of(&self, id: &str) -> ObjectType {
        self.objects
            .get(id)
            .map(Element::object_type)
            .unwrap_or(ObjectType::Vertex)
    }

    fn add_at(
        &mut self,
        id: &str,
        kind: ErrorKind,
        object_type: ObjectType,
        field: &str,
        message: String,
    ) {
        let path = self.locations.get(id).cloned().unwrap_or_default();
        self.errors
            .add(ValidationError::new(kind, object_type, field, message).at(path));
    }
}

/// Cycle nodes without the closing repeat, rotated to start at the
/// smallest ID, so every rotation of one cycle maps to the same key.
fn canonical<'a>(cycle: &[&'a str]) -> Vec<&'a str> {
    let nodes = &cycle[..cycle.len().saturating_sub(1).max(1)];
    let start = nodes
        .iter()
        .enumerate()
        .min_by_key(|(_, node)| **node)
        .map(|(index, _)| index)
        .unwrap_or(0);
    nodes[start..].iter().chain(&nodes[..start]).copied().collect()
}

fn display_path(path: Option<&str>) -> &str {
    match path {
        Some("") | None => "<root>",
        Some(path) => path,
    }
}
