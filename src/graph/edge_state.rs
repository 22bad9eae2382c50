//! Mutable colour assignment of multigraph edges with trail-based undo

use crate::graph::multigraph::{EdgeId, Multigraph, Orientation, Port};
use std::fmt;

/// One of the two output cycles
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    /// First output cycle
    Z,
    /// Second output cycle
    W,
}

impl Color {
    /// Both colours, Z first
    pub const ALL: [Self; 2] = [Self::Z, Self::W];

    /// The opposite colour
    pub const fn other(self) -> Self {
        match self {
            Self::Z => Self::W,
            Self::W => Self::Z,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Z => 0,
            Self::W => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Z => f.write_str("Z"),
            Self::W => f.write_str("W"),
        }
    }
}

/// Assignment state of a single edge
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeState {
    /// Not yet assigned to either output cycle
    #[default]
    Free,
    /// Assigned to the given output cycle
    Fixed(Color),
}

/// Trail position to rewind to
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

/// Edges fixed by one operation, split by colour
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FixedEdges {
    /// Edges fixed to Z
    pub z: Vec<EdgeId>,
    /// Edges fixed to W
    pub w: Vec<EdgeId>,
}

impl FixedEdges {
    /// Record an edge under its colour
    pub fn push(&mut self, edge: EdgeId, color: Color) {
        match color {
            Color::Z => self.z.push(edge),
            Color::W => self.w.push(edge),
        }
    }

    /// Total number of edges recorded
    pub const fn len(&self) -> usize {
        self.z.len() + self.w.len()
    }

    /// Test if nothing was recorded
    pub const fn is_empty(&self) -> bool {
        self.z.is_empty() && self.w.is_empty()
    }
}

/// Colour state of every edge plus the per-port bookkeeping derived from it
///
/// Every fix is appended to a trail; `rewind` undoes fixes newest first, so
/// a branch restores the exact state it started from by rewinding to the
/// checkpoint it took on entry. Port loads may exceed the quota; such states
/// are reported through `is_overloaded` and are never accepted as solutions.
#[derive(Clone, Debug)]
pub struct EdgeStateTracker {
    orientation: Orientation,
    states: Vec<EdgeState>,
    edge_ports: Vec<[usize; 2]>,
    port_free: Vec<usize>,
    port_loads: Vec<[usize; 2]>,
    quota: usize,
    lengths: [usize; 2],
    overloaded: usize,
    trail: Vec<EdgeId>,
}

impl EdgeStateTracker {
    /// Create a tracker with every edge of `graph` free
    pub fn new(graph: &Multigraph) -> Self {
        let orientation = graph.orientation();
        let edge_ports: Vec<[usize; 2]> = (0..graph.edge_count())
            .map(|index| {
                graph
                    .edge_ports(EdgeId(index))
                    .map_or([0, 0], |[a, b]| [a.index(orientation), b.index(orientation)])
            })
            .collect();
        let port_free = graph
            .ports()
            .map(|port| graph.port_edges(port).len())
            .collect();

        Self {
            orientation,
            states: vec![EdgeState::Free; graph.edge_count()],
            edge_ports,
            port_free,
            port_loads: vec![[0, 0]; graph.port_count()],
            quota: orientation.quota(),
            lengths: [0, 0],
            overloaded: 0,
            trail: Vec::with_capacity(graph.edge_count()),
        }
    }

    /// Current state of an edge
    pub fn state(&self, edge: EdgeId) -> Option<EdgeState> {
        self.states.get(edge.0).copied()
    }

    /// Test if an edge is still unassigned
    pub fn is_free(&self, edge: EdgeId) -> bool {
        self.state(edge) == Some(EdgeState::Free)
    }

    /// Colour of a fixed edge
    pub fn color_of(&self, edge: EdgeId) -> Option<Color> {
        match self.state(edge)? {
            EdgeState::Fixed(color) => Some(color),
            EdgeState::Free => None,
        }
    }

    /// Assign a free edge to a colour
    ///
    /// Returns `false` without changing anything when the edge is unknown or
    /// already fixed.
    pub fn fix(&mut self, edge: EdgeId, color: Color) -> bool {
        let Some(ports) = self.edge_ports.get(edge.0).copied() else {
            return false;
        };
        let Some(state) = self.states.get_mut(edge.0) else {
            return false;
        };
        if *state != EdgeState::Free {
            return false;
        }
        *state = EdgeState::Fixed(color);

        let slot = color.slot();
        if let Some(length) = self.lengths.get_mut(slot) {
            *length += 1;
        }
        for port in ports {
            if let Some(free) = self.port_free.get_mut(port) {
                *free = free.saturating_sub(1);
            }
            if let Some(load) = self.port_loads.get_mut(port).and_then(|l| l.get_mut(slot)) {
                *load += 1;
                if *load == self.quota + 1 {
                    self.overloaded += 1;
                }
            }
        }
        self.trail.push(edge);
        true
    }

    fn release(&mut self, edge: EdgeId) {
        let Some(EdgeState::Fixed(color)) = self.state(edge) else {
            return;
        };
        let ports = self.edge_ports.get(edge.0).copied().unwrap_or_default();
        if let Some(state) = self.states.get_mut(edge.0) {
            *state = EdgeState::Free;
        }

        let slot = color.slot();
        if let Some(length) = self.lengths.get_mut(slot) {
            *length = length.saturating_sub(1);
        }
        for port in ports {
            if let Some(free) = self.port_free.get_mut(port) {
                *free += 1;
            }
            if let Some(load) = self.port_loads.get_mut(port).and_then(|l| l.get_mut(slot)) {
                if *load == self.quota + 1 {
                    self.overloaded = self.overloaded.saturating_sub(1);
                }
                *load = load.saturating_sub(1);
            }
        }
    }

    /// Mark the current trail position
    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.trail.len())
    }

    /// Undo every fix made after `checkpoint`, newest first
    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        while self.trail.len() > checkpoint.0 {
            if let Some(edge) = self.trail.pop() {
                self.release(edge);
            }
        }
    }

    /// Edges fixed after `checkpoint`, oldest first
    pub fn fixed_since(&self, checkpoint: Checkpoint) -> &[EdgeId] {
        self.trail.get(checkpoint.0..).unwrap_or_default()
    }

    /// Number of edges fixed to a colour
    pub fn length(&self, color: Color) -> usize {
        self.lengths.get(color.slot()).copied().unwrap_or(0)
    }

    /// Test if any port carries more edges of one colour than its quota
    pub const fn is_overloaded(&self) -> bool {
        self.overloaded > 0
    }

    /// Edges of a colour currently fixed at a port
    pub fn port_load(&self, port: Port, color: Color) -> usize {
        self.port_loads
            .get(port.index(self.orientation))
            .and_then(|loads| loads.get(color.slot()))
            .copied()
            .unwrap_or(0)
    }

    /// Unassigned edges remaining at a port
    pub fn port_free(&self, port: Port) -> usize {
        self.port_free
            .get(port.index(self.orientation))
            .copied()
            .unwrap_or(0)
    }

    /// Test if a port already carries its quota of a colour
    pub fn quota_filled(&self, port: Port, color: Color) -> bool {
        self.port_load(port, color) >= self.quota
    }

    /// Per-colour quota of every port
    pub const fn quota(&self) -> usize {
        self.quota
    }

    /// All edges of a colour in arena order
    pub fn edges_with(&self, color: Color) -> Vec<EdgeId> {
        self.states
            .iter()
            .enumerate()
            .filter(|&(_, state)| *state == EdgeState::Fixed(color))
            .map(|(index, _)| EdgeId(index))
            .collect()
    }

    /// Number of edges tracked
    pub const fn edge_count(&self) -> usize {
        self.states.len()
    }
}
