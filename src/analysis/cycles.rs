//! Cycle detection over a set of same-colour edges

use crate::graph::multigraph::Orientation;
use std::collections::{HashMap, HashSet};

/// Test whether the edge set contains any cycle
///
/// Edges are endpoint pairs; a self-loop is a cycle of length one and, for
/// undirected edges, a repeated pair is a cycle of length two.
pub fn has_cycle(edges: &[(usize, usize)], orientation: Orientation) -> bool {
    match orientation {
        Orientation::Directed => has_directed_cycle(edges),
        Orientation::Undirected => has_undirected_cycle(edges),
    }
}

/// Directed cycle test
///
/// Edges are merged into chains in sorted order, keeping for every chain its
/// start keyed by its end and vice versa. An edge whose target is the start
/// of the chain ending at its source closes a cycle. Edge sets in which some
/// vertex has two outgoing or two incoming edges do not form chains and are
/// checked by depth-first search instead.
pub fn has_directed_cycle(edges: &[(usize, usize)]) -> bool {
    if !is_chain_shaped(edges) {
        return has_directed_cycle_dfs(edges);
    }

    let mut sorted = edges.to_vec();
    sorted.sort_unstable();

    let mut start_of: HashMap<usize, usize> = HashMap::new();
    let mut end_of: HashMap<usize, usize> = HashMap::new();

    for (source, target) in sorted {
        if source == target {
            return true;
        }

        let start = start_of.remove(&source).unwrap_or(source);
        let end = end_of.remove(&target).unwrap_or(target);
        if start == target {
            return true;
        }

        end_of.remove(&start);
        start_of.remove(&end);
        end_of.insert(start, end);
        start_of.insert(end, start);
    }

    false
}

fn is_chain_shaped(edges: &[(usize, usize)]) -> bool {
    let mut sources = HashSet::with_capacity(edges.len());
    let mut targets = HashSet::with_capacity(edges.len());
    edges
        .iter()
        .all(|&(source, target)| sources.insert(source) && targets.insert(target))
}

fn has_directed_cycle_dfs(edges: &[(usize, usize)]) -> bool {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Open,
        Done,
    }

    let mut successors: HashMap<usize, Vec<usize>> = HashMap::new();
    for &(source, target) in edges {
        successors.entry(source).or_default().push(target);
    }

    let mut roots: Vec<usize> = successors.keys().copied().collect();
    roots.sort_unstable();

    let mut marks: HashMap<usize, Mark> = HashMap::new();
    for root in roots {
        if marks.contains_key(&root) {
            continue;
        }
        marks.insert(root, Mark::Open);
        let mut stack = vec![(root, 0_usize)];

        while let Some((vertex, next)) = stack.pop() {
            let successor = successors.get(&vertex).and_then(|s| s.get(next)).copied();
            let Some(child) = successor else {
                marks.insert(vertex, Mark::Done);
                continue;
            };
            stack.push((vertex, next + 1));
            match marks.get(&child) {
                Some(Mark::Open) => return true,
                Some(Mark::Done) => {}
                None => {
                    marks.insert(child, Mark::Open);
                    stack.push((child, 0));
                }
            }
        }
    }

    false
}

/// Undirected cycle test
///
/// Depth-first walk over every component; reaching an already visited vertex
/// through anything but the edge just used closes a cycle.
pub fn has_undirected_cycle(edges: &[(usize, usize)]) -> bool {
    let mut seen_pairs = HashSet::with_capacity(edges.len());
    let mut neighbours: HashMap<usize, Vec<usize>> = HashMap::new();

    for &(source, target) in edges {
        if source == target {
            return true;
        }
        let pair = Orientation::Undirected.normalize(source, target);
        if !seen_pairs.insert(pair) {
            return true;
        }
        neighbours.entry(source).or_default().push(target);
        neighbours.entry(target).or_default().push(source);
    }

    let mut roots: Vec<usize> = neighbours.keys().copied().collect();
    roots.sort_unstable();

    let mut visited: HashSet<usize> = HashSet::with_capacity(neighbours.len());
    for root in roots {
        if visited.contains(&root) {
            continue;
        }
        let mut stack = vec![(root, None)];
        while let Some((vertex, parent)) = stack.pop() {
            if !visited.insert(vertex) {
                return true;
            }
            for &next in neighbours.get(&vertex).map(Vec::as_slice).unwrap_or_default() {
                if Some(next) == parent {
                    continue;
                }
                if visited.contains(&next) {
                    return true;
                }
                stack.push((next, Some(vertex)));
            }
        }
    }

    false
}
