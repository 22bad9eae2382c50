//! Union multigraph of two Hamiltonian cycles, stored as an index arena

use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Canonical endpoint pairs of an edge set, used to compare cycles by edges
pub type EdgeSet = BTreeSet<(usize, usize)>;

/// Edge orientation of the cycles being compared
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Edges are ordered pairs; every vertex has two incoming and two outgoing edges
    Directed,
    /// Edges are unordered pairs; every vertex has four incident edges
    Undirected,
}

impl Orientation {
    /// Number of edges of one colour a single port may carry
    pub const fn quota(self) -> usize {
        match self {
            Self::Directed => 1,
            Self::Undirected => 2,
        }
    }

    /// Number of quota-sharing ports at every vertex
    pub const fn ports_per_vertex(self) -> usize {
        match self {
            Self::Directed => 2,
            Self::Undirected => 1,
        }
    }

    /// Endpoint pair in the form used for edge-set comparison
    ///
    /// Undirected pairs are ordered smallest label first
    pub const fn normalize(self, source: usize, target: usize) -> (usize, usize) {
        match self {
            Self::Directed => (source, target),
            Self::Undirected => {
                if source <= target {
                    (source, target)
                } else {
                    (target, source)
                }
            }
        }
    }

    /// Lowercase name used in titles and logs
    pub const fn label(self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Input cycle an edge was taken from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// First input cycle
    X,
    /// Second input cycle
    Y,
}

/// Stable index of an edge in the multigraph arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// One edge of the union multigraph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Tail vertex label (first endpoint for undirected edges)
    pub source: usize,
    /// Head vertex label (second endpoint for undirected edges)
    pub target: usize,
    /// Cycle the edge belongs to
    pub origin: Origin,
}

impl Edge {
    /// Endpoint opposite to `vertex`
    pub const fn other_end(&self, vertex: usize) -> usize {
        if self.source == vertex {
            self.target
        } else {
            self.source
        }
    }
}

/// Which edges of a vertex a port groups together
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Outgoing edges of a directed vertex
    Out,
    /// Incoming edges of a directed vertex
    In,
    /// All incident edges of an undirected vertex
    All,
}

impl Side {
    const fn offset(self) -> usize {
        match self {
            Self::Out | Self::All => 0,
            Self::In => 1,
        }
    }
}

/// Group of edges at one vertex sharing a per-colour quota
///
/// A Hamiltonian cycle uses exactly one outgoing and one incoming edge of a
/// directed vertex, and exactly two incident edges of an undirected vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Port {
    /// Vertex label
    pub vertex: usize,
    /// Edge group at that vertex
    pub side: Side,
}

impl Port {
    /// Dense index of the port among all ports of a graph with this orientation
    pub const fn index(self, orientation: Orientation) -> usize {
        self.vertex.saturating_sub(1) * orientation.ports_per_vertex() + self.side.offset()
    }
}

/// Vertex with its adjacency lists
#[derive(Clone, Debug, Default)]
pub struct Vertex {
    /// Vertex label (1-based)
    pub label: usize,
    /// Edges whose source is this vertex
    pub outgoing: Vec<EdgeId>,
    /// Edges whose target is this vertex
    pub incoming: Vec<EdgeId>,
}

impl Vertex {
    /// All incident edges, outgoing first
    pub fn incident(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.outgoing.iter().chain(self.incoming.iter()).copied()
    }

    /// Number of incident edges counted with multiplicity
    pub fn degree(&self) -> usize {
        self.outgoing.len() + self.incoming.len()
    }
}

/// Union of two Hamiltonian cycles on the labels `1..=n`
///
/// Vertices and edges live in arenas addressed by index. Edges of X are
/// inserted before edges of Y, each in cycle order, which fixes the iteration
/// order of every adjacency list.
#[derive(Clone, Debug)]
pub struct Multigraph {
    orientation: Orientation,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    port_edges: Vec<Vec<EdgeId>>,
    x_edges: EdgeSet,
    y_edges: EdgeSet,
}

impl Multigraph {
    /// Build the union multigraph of two cyclic vertex orders
    ///
    /// Both sequences are expected to be permutations of `1..=n` for the same
    /// `n`; labels outside that range are ignored.
    pub fn from_cycles(orientation: Orientation, x: &[usize], y: &[usize]) -> Self {
        let vertex_count = x.len();
        let vertices = (1..=vertex_count)
            .map(|label| Vertex {
                label,
                ..Vertex::default()
            })
            .collect();

        let mut graph = Self {
            orientation,
            vertices,
            edges: Vec::with_capacity(2 * vertex_count),
            port_edges: Vec::new(),
            x_edges: cycle_edge_set(orientation, x),
            y_edges: cycle_edge_set(orientation, y),
        };

        for (origin, cycle) in [(Origin::X, x), (Origin::Y, y)] {
            for (source, target) in cycle_pairs(cycle) {
                graph.add_edge(source, target, origin);
            }
        }

        graph.port_edges = graph.build_port_lists();
        graph
    }

    fn add_edge(&mut self, source: usize, target: usize, origin: Origin) {
        let id = EdgeId(self.edges.len());
        let in_range = |label: usize| label >= 1 && label <= self.vertices.len();
        if !in_range(source) || !in_range(target) {
            return;
        }

        self.edges.push(Edge {
            source,
            target,
            origin,
        });
        if let Some(vertex) = self.vertices.get_mut(source - 1) {
            vertex.outgoing.push(id);
        }
        if let Some(vertex) = self.vertices.get_mut(target - 1) {
            vertex.incoming.push(id);
        }
    }

    fn build_port_lists(&self) -> Vec<Vec<EdgeId>> {
        let mut lists = Vec::with_capacity(self.port_count());
        for vertex in &self.vertices {
            match self.orientation {
                Orientation::Directed => {
                    lists.push(vertex.outgoing.clone());
                    lists.push(vertex.incoming.clone());
                }
                Orientation::Undirected => lists.push(vertex.incident().collect()),
            }
        }
        lists
    }

    /// Orientation the graph was built with
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of vertices `n`
    pub const fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges, `2n` for well-formed input
    pub const fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All edges in arena order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge by identity
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// All vertices ordered by label
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex by label
    pub fn vertex(&self, label: usize) -> Option<&Vertex> {
        label.checked_sub(1).and_then(|index| self.vertices.get(index))
    }

    /// Canonical edge set of X
    pub const fn x_edges(&self) -> &EdgeSet {
        &self.x_edges
    }

    /// Canonical edge set of Y
    pub const fn y_edges(&self) -> &EdgeSet {
        &self.y_edges
    }

    /// Canonical endpoint pair of an edge
    pub fn canonical(&self, id: EdgeId) -> Option<(usize, usize)> {
        self.edge(id)
            .map(|edge| self.orientation.normalize(edge.source, edge.target))
    }

    /// Canonical edge set of a list of edge identities
    pub fn canonical_set(&self, ids: &[EdgeId]) -> EdgeSet {
        ids.iter().filter_map(|&id| self.canonical(id)).collect()
    }

    /// Endpoint pairs of a list of edge identities, as stored
    pub fn endpoint_pairs(&self, ids: &[EdgeId]) -> Vec<(usize, usize)> {
        ids.iter()
            .filter_map(|&id| self.edge(id).map(|edge| (edge.source, edge.target)))
            .collect()
    }

    /// Total number of ports
    pub const fn port_count(&self) -> usize {
        self.vertices.len() * self.orientation.ports_per_vertex()
    }

    /// Dense index of a port
    pub const fn port_index(&self, port: Port) -> usize {
        port.index(self.orientation)
    }

    /// Ports of a vertex
    pub fn vertex_ports(&self, vertex: usize) -> Vec<Port> {
        match self.orientation {
            Orientation::Directed => vec![
                Port {
                    vertex,
                    side: Side::Out,
                },
                Port {
                    vertex,
                    side: Side::In,
                },
            ],
            Orientation::Undirected => vec![Port {
                vertex,
                side: Side::All,
            }],
        }
    }

    /// All ports ordered by vertex label
    pub fn ports(&self) -> impl Iterator<Item = Port> + '_ {
        (1..=self.vertex_count()).flat_map(|vertex| self.vertex_ports(vertex))
    }

    /// The two ports an edge occupies
    pub fn edge_ports(&self, id: EdgeId) -> Option<[Port; 2]> {
        let edge = self.edge(id)?;
        let (source_side, target_side) = match self.orientation {
            Orientation::Directed => (Side::Out, Side::In),
            Orientation::Undirected => (Side::All, Side::All),
        };
        Some([
            Port {
                vertex: edge.source,
                side: source_side,
            },
            Port {
                vertex: edge.target,
                side: target_side,
            },
        ])
    }

    /// Edges grouped in a port
    pub fn port_edges(&self, port: Port) -> &[EdgeId] {
        self.port_edges
            .get(self.port_index(port))
            .map(Vec::as_slice).unwrap_or_default()
    }

    /// Edges a walk may leave `vertex` along
    ///
    /// Outgoing edges for directed graphs, all incident edges otherwise.
    pub fn leaving_edges(&self, vertex: usize) -> &[EdgeId] {
        let side = match self.orientation {
            Orientation::Directed => Side::Out,
            Orientation::Undirected => Side::All,
        };
        self.port_edges(Port { vertex, side })
    }

    /// All edges touching `vertex`, outgoing first
    pub fn incident_edges(&self, vertex: usize) -> Vec<EdgeId> {
        self.vertex(vertex)
            .map(|v| v.incident().collect())
            .unwrap_or_default()
    }

    /// Vertex reached by leaving `vertex` along `id`
    pub fn far_end(&self, id: EdgeId, vertex: usize) -> Option<usize> {
        self.edge(id).map(|edge| match self.orientation {
            Orientation::Directed => edge.target,
            Orientation::Undirected => edge.other_end(vertex),
        })
    }

    /// Pairs of parallel edges, one taken from each input cycle
    pub fn parallel_pairs(&self) -> Vec<(EdgeId, EdgeId)> {
        let mut from_x: HashMap<(usize, usize), EdgeId> = HashMap::new();
        let mut pairs = Vec::new();
        for (index, edge) in self.edges.iter().enumerate() {
            let key = self.orientation.normalize(edge.source, edge.target);
            match edge.origin {
                Origin::X => {
                    from_x.insert(key, EdgeId(index));
                }
                Origin::Y => {
                    if let Some(&twin) = from_x.get(&key) {
                        pairs.push((twin, EdgeId(index)));
                    }
                }
            }
        }
        pairs
    }

    /// Whether every port holds exactly twice its quota of edges
    ///
    /// Holds for the union of two Hamiltonian cycles on the same labels.
    pub fn has_regular_degrees(&self) -> bool {
        let expected = 2 * self.orientation.quota();
        self.port_edges.len() == self.port_count()
            && self.port_edges.iter().all(|edges| edges.len() == expected)
    }
}

/// Consecutive pairs of a cyclic vertex order, closing pair last
pub fn cycle_pairs(cycle: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    cycle
        .iter()
        .zip(cycle.iter().cycle().skip(1))
        .map(|(&source, &target)| (source, target))
}

/// Canonical edge set of a cyclic vertex order
pub fn cycle_edge_set(orientation: Orientation, cycle: &[usize]) -> EdgeSet {
    cycle_pairs(cycle)
        .map(|(source, target)| orientation.normalize(source, target))
        .collect()
}
