//! Depth-bounded path search used for cycle detection.

use std::collections::HashSet;

/// Outcome of searching for a path from a start node back to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CycleSearch<'a> {
    /// The target is unreachable.
    Clear,
    /// Path from the start node to the target, both included.
    Found(Vec<&'a str>),
    /// The search hit the depth ceiling; the path explored so far.
    TooDeep(Vec<&'a str>),
}

struct Frame<'a> {
    children: Vec<&'a str>,
    next: usize,
}

/// Iterative depth-first search from `start` toward `target`.
///
/// `start == target` short-circuits without calling `successors`. A node
/// whose subtree has been exhausted without reaching `target` is never
/// expanded again, so shared subgraphs cost one visit each. Paths longer
/// than `max_depth` end the search as [`CycleSearch::TooDeep`].
pub(crate) fn find_path<'a, F>(
    start: &'a str,
    target: &str,
    max_depth: usize,
    successors: F,
) -> CycleSearch<'a>
where
    F: Fn(&'a str) -> Vec<&'a str>,
{
    if start == target {
        return CycleSearch::Found(vec![start]);
    }

    let mut path = vec![start];
    let mut on_path: HashSet<&'a str> = HashSet::from([start]);
    let mut exhausted: HashSet<&'a str> = HashSet::new();
    let mut stack = vec![Frame {
        children: successors(start),
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let child = frame.children.get(frame.next).copied();
        frame.next += 1;

        let Some(child) = child else {
            stack.pop();
            if let Some(node) = path.pop() {
                on_path.remove(node);
                exhausted.insert(node);
            }
            continue;
        };

        if child == target {
            path.push(child);
            return CycleSearch::Found(path);
        }
        if on_path.contains(child) || exhausted.contains(child) {
            continue;
        }
        if path.len() >= max_depth {
            path.push(child);
            return CycleSearch::TooDeep(path);
        }

        path.push(child);
        on_path.insert(child);
        stack.push(Frame {
            children: successors(child),
            next: 0,
        });
    }

    CycleSearch::Clear
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;

    fn graph<'a>(edges: &[(&'a str, &'a str)]) -> HashMap<&'a str, Vec<&'a str>> {
        let mut map: HashMap<&'a str, Vec<&'a str>> = HashMap::new();
        for &(from, to) in edges {
            map.entry(from).or_default().push(to);
        }
        map
    }

    #[test]
    fn self_reference_short_circuits() {
        let result = find_path("a", "a", 100, |_| panic!("traversal should not run"));
        assert_eq!(result, CycleSearch::Found(vec!["a"]));
    }

    #[test]
    fn finds_path_through_three_nodes() {
        let edges = graph(&[("a", "b"), ("b", "c"), ("c", "a")]);
        let result = find_path("b", "a", 100, |n| edges.get(n).cloned().unwrap_or_default());

        assert_eq!(result, CycleSearch::Found(vec!["b", "c", "a"]));
    }

    #[test]
    fn unreachable_target_is_clear() {
        let edges = graph(&[("a", "b"), ("b", "c")]);
        let result = find_path("a", "z", 100, |n| edges.get(n).cloned().unwrap_or_default());

        assert_eq!(result, CycleSearch::Clear);
    }

    #[test]
    fn unrelated_loops_terminate() {
        let edges = graph(&[("a", "b"), ("b", "c"), ("c", "b")]);
        let result = find_path("a", "z", 100, |n| edges.get(n).cloned().unwrap_or_default());

        assert_eq!(result, CycleSearch::Clear);
    }

    #[test]
    fn backtracking_unmarks_the_abandoned_branch() {
        let edges = graph(&[("a", "b"), ("a", "c"), ("b", "x"), ("c", "b"), ("b", "t")]);
        let result = find_path("a", "t", 100, |n| edges.get(n).cloned().unwrap_or_default());

        assert_eq!(result, CycleSearch::Found(vec!["a", "b", "t"]));
    }

    #[test]
    fn path_follows_first_reachable_branch() {
        let edges = graph(&[
            ("a", "b"),
            ("b", "b1"),
            ("b1", "c"),
            ("a", "c"),
            ("c", "t"),
        ]);
        let result = find_path("a", "t", 100, |n| edges.get(n).cloned().unwrap_or_default());

        assert_eq!(result, CycleSearch::Found(vec!["a", "b", "b1", "c", "t"]));
    }

    #[test]
    fn depth_ceiling_fails_closed() {
        let names: Vec<String> = (0..10).map(|i| format!("n{i}")).collect();
        let chain: Vec<(&str, &str)> = names
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
            .collect();
        let edges = graph(&chain);

        let result = find_path("n0", "missing", 3, |n| edges.get(n).cloned().unwrap_or_default());
        match result {
            CycleSearch::TooDeep(path) => assert_eq!(path, vec!["n0", "n1", "n2", "n3"]),
            other => panic!("Expected TooDeep, got {other:?}"),
        }
    }

    #[test]
    fn shared_subgraphs_are_expanded_once() {
        // Each level fans out to two nodes that both lead to the next level.
        let levels = 40;
        let names: Vec<[String; 3]> = (0..levels)
            .map(|i| [format!("m{i}"), format!("a{i}"), format!("b{i}")])
            .collect();
        let mut edges: Vec<(&str, &str)> = Vec::new();
        for (level, [m, a, b]) in names.iter().enumerate() {
            edges.push((m.as_str(), a.as_str()));
            edges.push((m.as_str(), b.as_str()));
            if let Some([next, _, _]) = names.get(level + 1) {
                edges.push((a.as_str(), next.as_str()));
                edges.push((b.as_str(), next.as_str()));
            }
        }
        let edges = graph(&edges);
        let expansions = Cell::new(0usize);

        let result = find_path("m0", "missing", 1000, |n| {
            expansions.set(expansions.get() + 1);
            edges.get(n).cloned().unwrap_or_default()
        });

        assert_eq!(result, CycleSearch::Clear);
        assert_eq!(expansions.get(), levels * 3);
    }
}
