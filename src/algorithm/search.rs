//! Shared search state, method catalogue and the entry point of every engine

use crate::{
    algorithm::{
        chain_fixing::ChainFixingSearch,
        simple_path::SimplePathSearch,
        timeout::{Timeout, TimeoutGuard},
    },
    analysis::{
        cycles::has_cycle,
        hamiltonian::{cycle_order, is_hamiltonian_cycle},
    },
    graph::{
        edge_state::{Color, EdgeStateTracker},
        multigraph::{EdgeId, Multigraph, Orientation},
    },
};
use std::fmt;
use tracing::debug;

/// How an engine explores the assignment space
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Grow Z as one path in vertex order, forcing W at every visited vertex
    SimplePath,
    /// Branch on the most constrained port and propagate forced colours
    ChainFixing,
}

impl Strategy {
    /// Human readable name
    pub const fn label(self) -> &'static str {
        match self {
            Self::SimplePath => "Simple path",
            Self::ChainFixing => "Chain edge fixing",
        }
    }
}

/// One of the four search engines
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Method {
    /// Orientation of the input cycles
    pub orientation: Orientation,
    /// Exploration strategy
    pub strategy: Strategy,
}

impl Method {
    /// Every method, in command-line numbering order
    pub const ALL: [Self; 4] = [
        Self::new(Orientation::Directed, Strategy::SimplePath),
        Self::new(Orientation::Undirected, Strategy::SimplePath),
        Self::new(Orientation::Directed, Strategy::ChainFixing),
        Self::new(Orientation::Undirected, Strategy::ChainFixing),
    ];

    /// Pair an orientation with a strategy
    pub const fn new(orientation: Orientation, strategy: Strategy) -> Self {
        Self {
            orientation,
            strategy,
        }
    }

    /// Method with the given command-line number
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Command-line number of this method
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|&method| method == self)
            .unwrap_or_default()
    }

    /// Title used in reports and timeout messages
    pub fn title(self) -> String {
        format!("{} for {} cycles", self.strategy.label(), self.orientation)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

/// Two Hamiltonian cycles Z and W partitioning the union multigraph
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decomposition {
    /// Orientation the cycles were found in
    pub orientation: Orientation,
    /// Endpoint pairs of Z, in edge arena order
    pub z: Vec<(usize, usize)>,
    /// Endpoint pairs of W, in edge arena order
    pub w: Vec<(usize, usize)>,
    /// Edge identities of Z
    pub z_edges: Vec<EdgeId>,
    /// Edge identities of W
    pub w_edges: Vec<EdgeId>,
}

impl Decomposition {
    /// Vertex order of Z starting at vertex 1
    pub fn z_order(&self) -> Option<Vec<usize>> {
        cycle_order(&self.z, self.orientation)
    }

    /// Vertex order of W starting at vertex 1
    pub fn w_order(&self) -> Option<Vec<usize>> {
        cycle_order(&self.w, self.orientation)
    }
}

/// Final answer of a completed search
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// A valid decomposition exists; one witness is attached
    Decomposable(Decomposition),
    /// Every assignment was refuted
    NotDecomposable,
}

impl Verdict {
    /// Test if a decomposition was found
    pub const fn is_decomposable(&self) -> bool {
        matches!(self, Self::Decomposable(_))
    }

    /// The witness decomposition, if any
    pub const fn decomposition(&self) -> Option<&Decomposition> {
        match self {
            Self::Decomposable(decomposition) => Some(decomposition),
            Self::NotDecomposable => None,
        }
    }
}

/// Counters collected while searching
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Recursive entries, each of which consulted the timeout guard
    pub nodes: u64,
    /// Branches abandoned after fixing at least one edge
    pub dead_ends: u64,
}

/// State shared by every engine while searching one multigraph
pub struct SearchContext<'a> {
    /// Multigraph being decomposed
    pub graph: &'a Multigraph,
    /// Colour assignment explored by the search
    pub tracker: EdgeStateTracker,
    /// Counters for logging
    pub stats: SearchStats,
    guard: TimeoutGuard,
}

impl<'a> SearchContext<'a> {
    /// Fresh context with every edge free
    pub fn new(graph: &'a Multigraph, guard: TimeoutGuard) -> Self {
        Self {
            graph,
            tracker: EdgeStateTracker::new(graph),
            stats: SearchStats::default(),
            guard,
        }
    }

    /// Register a recursive entry and consult the timeout guard
    ///
    /// # Errors
    ///
    /// Returns the [`Timeout`] reported by the guard
    pub fn enter(&mut self) -> Result<(), Timeout> {
        self.stats.nodes += 1;
        self.guard.check().into_result()
    }

    /// Number of vertices `n`
    pub const fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Orientation of the multigraph
    pub const fn orientation(&self) -> Orientation {
        self.graph.orientation()
    }

    /// Endpoint pairs of every edge fixed to a colour
    pub fn pairs(&self, color: Color) -> Vec<(usize, usize)> {
        self.graph.endpoint_pairs(&self.tracker.edges_with(color))
    }

    /// Test if a colour holds a cycle while it is still shorter than `n`
    pub fn has_premature_cycle(&self, color: Color) -> bool {
        self.tracker.length(color) < self.vertex_count()
            && has_cycle(&self.pairs(color), self.orientation())
    }

    /// Test if both colours hold `n` edges
    pub fn is_complete(&self) -> bool {
        let n = self.vertex_count();
        self.tracker.length(Color::Z) == n && self.tracker.length(Color::W) == n
    }

    /// Success test for a complete assignment
    ///
    /// Both colours must be Hamiltonian cycles and neither may have the edge
    /// set of X or of Y.
    pub fn accepts_closure(&self) -> bool {
        if !self.is_complete() || self.tracker.is_overloaded() {
            return false;
        }
        let n = self.vertex_count();
        Color::ALL.into_iter().all(|color| {
            let ids = self.tracker.edges_with(color);
            let canonical = self.graph.canonical_set(&ids);
            canonical != *self.graph.x_edges()
                && canonical != *self.graph.y_edges()
                && is_hamiltonian_cycle(
                    &self.graph.endpoint_pairs(&ids),
                    n,
                    self.orientation(),
                )
        })
    }

    /// Snapshot of the current assignment as a decomposition
    pub fn decomposition(&self) -> Decomposition {
        let z_edges = self.tracker.edges_with(Color::Z);
        let w_edges = self.tracker.edges_with(Color::W);
        Decomposition {
            orientation: self.orientation(),
            z: self.graph.endpoint_pairs(&z_edges),
            w: self.graph.endpoint_pairs(&w_edges),
            z_edges,
            w_edges,
        }
    }
}

/// A backtracking engine deciding one multigraph
pub trait SearchEngine {
    /// Explore the assignment space until a verdict is reached
    ///
    /// # Errors
    ///
    /// Returns a [`Timeout`] when the guard reports an expired deadline
    fn run(&mut self) -> Result<Verdict, Timeout>;

    /// Counters collected so far
    fn stats(&self) -> SearchStats;
}

/// Decide whether two cyclic vertex orders admit a different decomposition
///
/// Both sequences must be permutations of the same label set `1..=n`.
///
/// # Errors
///
/// Returns a [`Timeout`] when the guard reports an expired deadline
pub fn decide(
    method: Method,
    x: &[usize],
    y: &[usize],
    guard: TimeoutGuard,
) -> Result<Verdict, Timeout> {
    let graph = Multigraph::from_cycles(method.orientation, x, y);
    decide_on(&graph, method.strategy, guard)
}

/// Run one strategy over an already built multigraph
///
/// Multigraphs on fewer than three vertices, or whose degrees are not those
/// of two Hamiltonian cycles, are reported as not decomposable.
///
/// # Errors
///
/// Returns a [`Timeout`] when the guard reports an expired deadline
pub fn decide_on(
    graph: &Multigraph,
    strategy: Strategy,
    guard: TimeoutGuard,
) -> Result<Verdict, Timeout> {
    if graph.vertex_count() < 3 || !graph.has_regular_degrees() {
        return Ok(Verdict::NotDecomposable);
    }

    let (verdict, stats) = match strategy {
        Strategy::SimplePath => {
            let mut engine = SimplePathSearch::new(graph, guard);
            let verdict = engine.run();
            (verdict, engine.stats())
        }
        Strategy::ChainFixing => {
            let mut engine = ChainFixingSearch::new(graph, guard);
            let verdict = engine.run();
            (verdict, engine.stats())
        }
    };

    debug!(
        strategy = strategy.label(),
        orientation = %graph.orientation(),
        vertices = graph.vertex_count(),
        nodes = stats.nodes,
        dead_ends = stats.dead_ends,
        "search finished"
    );
    verdict
}
