use crate::graph::{
    edge_state::EdgeStateTracker,
    multigraph::{Multigraph, Port},
};

/// Number of unassigned edges touching a vertex
pub fn vertex_free_slots(graph: &Multigraph, tracker: &EdgeStateTracker, vertex: usize) -> usize {
    graph
        .vertex(vertex)
        .map_or(0, |v| v.incident().filter(|&edge| tracker.is_free(edge)).count())
}

/// Choose the port to branch on next
///
/// Picks the most constrained port that still has unassigned edges: fewest
/// free edges first, then fewest free edges at its vertex, then the lowest
/// vertex label. Returns `None` once every edge is assigned.
pub fn select_branch_port(graph: &Multigraph, tracker: &EdgeStateTracker) -> Option<Port> {
    graph
        .ports()
        .filter_map(|port| {
            let free = tracker.port_free(port);
            (free > 0).then(|| {
                (
                    free,
                    vertex_free_slots(graph, tracker, port.vertex),
                    port.vertex,
                    port.side,
                    port,
                )
            })
        })
        .min_by_key(|&(free, slots, vertex, side, _)| (free, slots, vertex, side))
        .map(|(.., port)| port)
}
