use crate::graph::{
    edge_state::{Color, EdgeStateTracker, FixedEdges},
    multigraph::{EdgeId, Multigraph},
};
use std::collections::VecDeque;

/// An edge that must take a specific colour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForcedAssignment {
    /// Edge to assign
    pub edge: EdgeId,
    /// Colour the edge is forced to
    pub color: Color,
}

/// Pipeline for processing forced assignments in order
#[derive(Debug)]
pub struct ForcedPipeline {
    /// Queue of edges that must be fixed to specific colours
    pub queue: VecDeque<ForcedAssignment>,
}

impl Default for ForcedPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ForcedPipeline {
    /// Create a new empty pipeline
    pub const fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Add an assignment to the queue, skipping edges already queued with the same colour
    pub fn push(&mut self, assignment: ForcedAssignment) {
        if !self.queue.contains(&assignment) {
            self.queue.push_back(assignment);
        }
    }

    /// Remove and return the next forced assignment
    pub fn take_next(&mut self) -> Option<ForcedAssignment> {
        self.queue.pop_front()
    }
}

/// Outcome of fixing an edge and everything it forces
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Propagation {
    /// The assignment is consistent; holds exactly the edges fixed, by colour
    Consistent(FixedEdges),
    /// Some port would exceed its quota, or an edge would need both colours
    Conflict,
}

impl Propagation {
    /// Test for a conflict
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict)
    }
}

/// Fix an edge to a colour and propagate the consequences transitively
///
/// Whenever a port reaches its quota of one colour, every free edge left at
/// that port is forced to the other colour. On conflict every fix made by
/// this call is undone before returning; on success the caller owns the
/// fixes and undoes them by rewinding to a checkpoint taken before the call.
pub fn fix_edge(
    graph: &Multigraph,
    tracker: &mut EdgeStateTracker,
    edge: EdgeId,
    color: Color,
) -> Propagation {
    let checkpoint = tracker.checkpoint();
    let mut pipeline = ForcedPipeline::new();
    pipeline.push(ForcedAssignment { edge, color });

    while let Some(assignment) = pipeline.take_next() {
        match tracker.color_of(assignment.edge) {
            Some(existing) if existing == assignment.color => continue,
            Some(_) => {
                tracker.rewind(checkpoint);
                return Propagation::Conflict;
            }
            None => {}
        }

        if !tracker.fix(assignment.edge, assignment.color) || tracker.is_overloaded() {
            tracker.rewind(checkpoint);
            return Propagation::Conflict;
        }

        for port in graph.edge_ports(assignment.edge).into_iter().flatten() {
            if !tracker.quota_filled(port, assignment.color) {
                continue;
            }
            for &other in graph.port_edges(port) {
                if tracker.is_free(other) {
                    pipeline.push(ForcedAssignment {
                        edge: other,
                        color: assignment.color.other(),
                    });
                }
            }
        }
    }

    Propagation::Consistent(collect_fixed(tracker, tracker.fixed_since(checkpoint)))
}

fn collect_fixed(tracker: &EdgeStateTracker, edges: &[EdgeId]) -> FixedEdges {
    let mut fixed = FixedEdges::default();
    for &edge in edges {
        if let Some(color) = tracker.color_of(edge) {
            fixed.push(edge, color);
        }
    }
    fixed
}

/// Give the two copies of every doubled edge opposite colours
///
/// The X copy takes Z and the Y copy takes W unless earlier propagation
/// already decided one of them. Copies are interchangeable and can never
/// share a colour in a Hamiltonian cycle on three or more vertices, so this
/// loses no decomposition up to edge identity. All fixes are undone on
/// conflict.
pub fn split_multiedges(graph: &Multigraph, tracker: &mut EdgeStateTracker) -> Propagation {
    let checkpoint = tracker.checkpoint();

    for (x_copy, y_copy) in graph.parallel_pairs() {
        let outcome = match (tracker.color_of(x_copy), tracker.color_of(y_copy)) {
            (None, None) => match fix_edge(graph, tracker, x_copy, Color::Z) {
                Propagation::Conflict => Propagation::Conflict,
                Propagation::Consistent(_) if tracker.is_free(y_copy) => {
                    fix_edge(graph, tracker, y_copy, Color::W)
                }
                Propagation::Consistent(fixed) => {
                    if tracker.color_of(y_copy) == Some(Color::Z) {
                        Propagation::Conflict
                    } else {
                        Propagation::Consistent(fixed)
                    }
                }
            },
            (Some(color), None) => fix_edge(graph, tracker, y_copy, color.other()),
            (None, Some(color)) => fix_edge(graph, tracker, x_copy, color.other()),
            (Some(first), Some(second)) if first == second => Propagation::Conflict,
            (Some(_), Some(_)) => Propagation::Consistent(FixedEdges::default()),
        };

        if outcome.is_conflict() {
            tracker.rewind(checkpoint);
            return Propagation::Conflict;
        }
    }

    Propagation::Consistent(collect_fixed(tracker, tracker.fixed_since(checkpoint)))
}
