//! Hamiltonicity verification and cycle ordering of a claimed edge set

use crate::graph::multigraph::Orientation;
use std::collections::{HashMap, HashSet};

/// Edge indices touching each vertex, split by direction
///
/// For undirected edges both endpoints record the edge in `forward`.
struct Incidence {
    forward: HashMap<usize, Vec<usize>>,
    backward: HashMap<usize, Vec<usize>>,
}

impl Incidence {
    fn new(edges: &[(usize, usize)], orientation: Orientation) -> Self {
        let mut forward: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut backward: HashMap<usize, Vec<usize>> = HashMap::new();
        for (index, &(source, target)) in edges.iter().enumerate() {
            forward.entry(source).or_default().push(index);
            match orientation {
                Orientation::Directed => backward.entry(target).or_default().push(index),
                Orientation::Undirected => forward.entry(target).or_default().push(index),
            }
        }
        Self { forward, backward }
    }

    fn forward(&self, vertex: usize) -> &[usize] {
        self.forward.get(&vertex).map(Vec::as_slice).unwrap_or_default()
    }

    fn backward(&self, vertex: usize) -> &[usize] {
        self.backward.get(&vertex).map(Vec::as_slice).unwrap_or_default()
    }
}

fn far_end(edge: (usize, usize), vertex: usize) -> usize {
    if edge.0 == vertex { edge.1 } else { edge.0 }
}

/// Test whether `edges` form a single cycle through exactly `length` vertices
///
/// A path is grown greedily from the first edge. Its tail extends along
/// edges leaving the tail vertex and its head along edges entering the head
/// vertex (any incident edge for undirected input), always to a vertex not
/// yet on the path. In a Hamiltonian cycle every extension is forced, so a
/// dead end proves the set is not one. The set is accepted when `length - 1`
/// edges form the path and the last edge joins its two ends.
pub fn is_hamiltonian_cycle(
    edges: &[(usize, usize)],
    length: usize,
    orientation: Orientation,
) -> bool {
    if edges.len() != length {
        return false;
    }
    let Some(&(first_source, first_target)) = edges.first() else {
        return false;
    };
    if first_source == first_target {
        return length == 1;
    }

    let incidence = Incidence::new(edges, orientation);
    let mut used = vec![false; edges.len()];
    if let Some(flag) = used.get_mut(0) {
        *flag = true;
    }
    let mut on_path: HashSet<usize> = HashSet::from([first_source, first_target]);
    let mut head = first_source;
    let mut tail = first_target;

    for _ in 1..length.saturating_sub(1) {
        let tail_step = incidence.forward(tail).iter().copied().find(|&index| {
            !used.get(index).copied().unwrap_or(true)
                && edges
                    .get(index)
                    .is_some_and(|&edge| !on_path.contains(&far_end(edge, tail)))
        });

        let head_candidates = match orientation {
            Orientation::Directed => incidence.backward(head),
            Orientation::Undirected => incidence.forward(head),
        };
        let step = tail_step.map(|index| (index, true)).or_else(|| {
            head_candidates
                .iter()
                .copied()
                .find(|&index| {
                    !used.get(index).copied().unwrap_or(true)
                        && edges
                            .get(index)
                            .is_some_and(|&edge| !on_path.contains(&far_end(edge, head)))
                })
                .map(|index| (index, false))
        });

        let Some((index, at_tail)) = step else {
            return false;
        };
        let Some(&edge) = edges.get(index) else {
            return false;
        };
        if let Some(flag) = used.get_mut(index) {
            *flag = true;
        }
        if at_tail {
            tail = far_end(edge, tail);
            on_path.insert(tail);
        } else {
            head = far_end(edge, head);
            on_path.insert(head);
        }
    }

    incidence.forward(tail).iter().any(|&index| {
        !used.get(index).copied().unwrap_or(true)
            && edges
                .get(index)
                .is_some_and(|&edge| far_end(edge, tail) == head)
    })
}

/// Vertex order of a Hamiltonian edge set, starting at its smallest label
///
/// Directed cycles are followed along their edges; undirected cycles are
/// walked towards the smaller neighbour of the start first. Returns `None`
/// when the edges do not form a single cycle through all their vertices.
pub fn cycle_order(edges: &[(usize, usize)], orientation: Orientation) -> Option<Vec<usize>> {
    if !is_hamiltonian_cycle(edges, edges.len(), orientation) {
        return None;
    }
    let start = edges.iter().flat_map(|&(a, b)| [a, b]).min()?;
    let incidence = Incidence::new(edges, orientation);

    let first_step = match orientation {
        Orientation::Directed => incidence
            .forward(start)
            .first()
            .and_then(|&index| edges.get(index))
            .map(|&(_, target)| target)?,
        Orientation::Undirected => incidence
            .forward(start)
            .iter()
            .filter_map(|&index| edges.get(index))
            .map(|&edge| far_end(edge, start))
            .min()?,
    };

    let mut order = Vec::with_capacity(edges.len());
    order.push(start);
    let mut previous = start;
    let mut current = first_step;
    while current != start && order.len() < edges.len() {
        order.push(current);
        let next = incidence
            .forward(current)
            .iter()
            .filter_map(|&index| edges.get(index))
            .map(|&edge| match orientation {
                Orientation::Directed => edge.1,
                Orientation::Undirected => far_end(edge, current),
            })
            .find(|&candidate| orientation == Orientation::Directed || candidate != previous)?;
        previous = current;
        current = next;
    }

    (order.len() == edges.len()).then_some(order)
}
