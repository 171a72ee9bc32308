//! Enumerated attributes of model entities.

crate::model_enum! {
    /// Type tag carried by every vertex.
    pub enum VertexType {
        State => "state",
        Pseudostate => "pseudostate",
        FinalState => "finalstate",
    }
}

crate::model_enum! {
    /// Kind of a pseudostate.
    pub enum PseudostateKind {
        Initial => "initial",
        DeepHistory => "deepHistory",
        ShallowHistory => "shallowHistory",
        Fork => "fork",
        Join => "join",
        Junction => "junction",
        Choice => "choice",
        EntryPoint => "entryPoint",
        ExitPoint => "exitPoint",
        Terminate => "terminate",
    }
}

impl PseudostateKind {
    /// History kinds only make sense inside a region.
    pub fn is_history(&self) -> bool {
        matches!(self, Self::DeepHistory | Self::ShallowHistory)
    }

    /// Entry and exit points form the boundary of a state machine.
    pub fn is_connection_point(&self) -> bool {
        matches!(self, Self::EntryPoint | Self::ExitPoint)
    }
}

crate::model_enum! {
    /// Kind of a transition.
    pub enum TransitionKind {
        External => "external",
        Internal => "internal",
        Local => "local",
    }
}

impl Default for TransitionKind {
    fn default() -> Self {
        Self::External
    }
}
