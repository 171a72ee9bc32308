//! Insertion-ordered adjacency maps keyed by element ID.

use std::collections::HashMap;

/// Directed adjacency with duplicate-free edges.
///
/// `edges` keeps first-insertion order so every pass over the graph, and
/// the errors it produces, is stable for a given model.
#[derive(Debug, Default)]
pub(crate) struct Adjacency<'a> {
    edges: Vec<(&'a str, &'a str)>,
    targets: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Adjacency<'a> {
    /// Record `from -> to`; returns false when the edge already existed.
    pub(crate) fn insert(&mut self, from: &'a str, to: &'a str) -> bool {
        let targets = self.targets.entry(from).or_default();
        if targets.contains(&to) {
            return false;
        }
        targets.push(to);
        self.edges.push((from, to));
        true
    }

    /// Record `a -> b` and `b -> a`.
    pub(crate) fn insert_both(&mut self, a: &'a str, b: &'a str) {
        self.insert(a, b);
        self.insert(b, a);
    }

    pub(crate) fn contains(&self, from: &str, to: &str) -> bool {
        self.targets
            .get(from)
            .is_some_and(|targets| targets.contains(&to))
    }

    pub(crate) fn successors(&self, node: &str) -> &[&'a str] {
        self.targets.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn edges(&self) -> &[(&'a str, &'a str)] {
        &self.edges
    }

    pub(crate) fn len(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_ignores_duplicate_edges() {
        let mut graph = Adjacency::default();
        assert!(graph.insert("a", "b"));
        assert!(!graph.insert("a", "b"));
        assert!(graph.insert("a", "c"));

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.successors("a"), &["b", "c"]);
        assert!(graph.successors("b").is_empty());
    }

    #[test]
    fn insert_both_records_each_direction() {
        let mut graph = Adjacency::default();
        graph.insert_both("s", "t");

        assert!(graph.contains("s", "t"));
        assert!(graph.contains("t", "s"));
        assert_eq!(graph.edges(), &[("s", "t"), ("t", "s")]);
    }

    #[test]
    fn self_loop_is_recorded_once() {
        let mut graph = Adjacency::default();
        graph.insert_both("s", "s");

        assert_eq!(graph.len(), 1);
    }
}
