//! Vertex-order depth-first engine
//!
//! Z is grown as a single path leaving the start vertex. Every time the path
//! leaves a vertex, all remaining edges of that vertex are forced into W, so
//! W is built as a by-product and only needs its cycle checks.

use crate::{
    algorithm::{
        search::{SearchContext, SearchEngine, SearchStats, Verdict},
        timeout::{Timeout, TimeoutGuard},
    },
    analysis::{cycles::has_cycle, hamiltonian::is_hamiltonian_cycle},
    graph::{
        edge_state::Color,
        multigraph::{EdgeId, Multigraph, Orientation},
        vertex_set::VertexSet,
    },
    io::configuration::START_VERTEX,
};
use std::collections::HashSet;
use tracing::debug;

/// Two Z edges at the start vertex the path begins with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seed {
    /// Edge the finished cycle returns to the start vertex along
    pub arrival: EdgeId,
    /// Edge the path leaves the start vertex along
    pub departure: EdgeId,
}

/// Depth-first search over Z paths in vertex order
pub struct SimplePathSearch<'a> {
    ctx: SearchContext<'a>,
    visited: VertexSet,
}

impl<'a> SimplePathSearch<'a> {
    /// Engine over `graph` with every edge free
    pub fn new(graph: &'a Multigraph, guard: TimeoutGuard) -> Self {
        Self {
            ctx: SearchContext::new(graph, guard),
            visited: VertexSet::new(graph.vertex_count()),
        }
    }

    /// Every distinct way to choose the two Z edges at the start vertex
    ///
    /// Directed graphs pair each incoming with each outgoing edge; undirected
    /// graphs take every pair of incident edges that are not copies of each
    /// other. Seeds differing only in which copy of a doubled edge they use
    /// are listed once.
    pub fn seeds(&self) -> Vec<Seed> {
        let graph = self.ctx.graph;
        let Some(start) = graph.vertex(START_VERTEX) else {
            return Vec::new();
        };

        let candidates: Vec<Seed> = match graph.orientation() {
            Orientation::Directed => start
                .incoming
                .iter()
                .flat_map(move |&arrival| {
                    start.outgoing.iter().map(move |&departure| Seed {
                        arrival,
                        departure,
                    })
                })
                .collect(),
            Orientation::Undirected => {
                let incident: Vec<EdgeId> = start.incident().collect();
                incident
                    .iter()
                    .enumerate()
                    .flat_map(|(i, &arrival)| {
                        incident
                            .iter()
                            .skip(i + 1)
                            .map(move |&departure| Seed { arrival, departure })
                    })
                    .filter(|seed| graph.canonical(seed.arrival) != graph.canonical(seed.departure))
                    .collect()
            }
        };

        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter(|seed| {
                let first = graph.canonical(seed.arrival);
                let second = graph.canonical(seed.departure);
                let key = match graph.orientation() {
                    Orientation::Directed => (first, second),
                    Orientation::Undirected => (first.min(second), first.max(second)),
                };
                seen.insert(key)
            })
            .collect()
    }

    /// Fix a seed and the W edges it forces at the start vertex
    ///
    /// Returns the vertex the path continues from, or `None` when the seed
    /// is already inconsistent. The caller rewinds the tracker and clears the
    /// vertex marks either way.
    fn plant(&mut self, seed: Seed) -> Option<usize> {
        let graph = self.ctx.graph;
        let closing_end = graph.edge(seed.arrival)?.other_end(START_VERTEX);
        let walk_start = graph.edge(seed.departure)?.other_end(START_VERTEX);

        let tracker = &mut self.ctx.tracker;
        if !tracker.fix(seed.arrival, Color::Z) || !tracker.fix(seed.departure, Color::Z) {
            return None;
        }
        for edge in graph.incident_edges(START_VERTEX) {
            if tracker.is_free(edge) {
                tracker.fix(edge, Color::W);
            }
        }

        self.visited.insert(START_VERTEX);
        self.visited.insert(closing_end);
        self.visited.insert(walk_start);

        let consistent = !self.ctx.tracker.is_overloaded()
            && !self.ctx.has_premature_cycle(Color::Z)
            && self.w_cycle_is_acceptable();
        consistent.then_some(walk_start)
    }

    /// A W cycle may only appear as the complete Hamiltonian W
    fn w_cycle_is_acceptable(&self) -> bool {
        let n = self.ctx.vertex_count();
        let pairs = self.ctx.pairs(Color::W);
        if !has_cycle(&pairs, self.ctx.orientation()) {
            return true;
        }
        self.ctx.tracker.length(Color::W) == n
            && is_hamiltonian_cycle(&pairs, n, self.ctx.orientation())
    }

    /// Continue the Z path from `vertex`
    fn extend(&mut self, vertex: usize) -> Result<bool, Timeout> {
        self.ctx.enter()?;
        let graph = self.ctx.graph;
        let n = self.ctx.vertex_count();

        let candidates: Vec<EdgeId> = graph
            .leaving_edges(vertex)
            .iter()
            .copied()
            .filter(|&edge| self.ctx.tracker.is_free(edge))
            .collect();

        for edge in candidates {
            let Some(next) = graph.far_end(edge, vertex) else {
                continue;
            };
            if self.visited.contains(next) && self.ctx.tracker.length(Color::Z) + 1 != n {
                continue;
            }

            let checkpoint = self.ctx.tracker.checkpoint();
            if !self.ctx.tracker.fix(edge, Color::Z) {
                continue;
            }
            let newly_marked = self.visited.insert(next);

            let mut w_added = false;
            for other in graph.incident_edges(vertex) {
                if self.ctx.tracker.is_free(other) {
                    w_added |= self.ctx.tracker.fix(other, Color::W);
                }
            }

            let viable =
                !self.ctx.tracker.is_overloaded() && (!w_added || self.w_cycle_is_acceptable());
            let found = if viable && self.ctx.is_complete() {
                self.ctx.accepts_closure()
            } else if viable && self.ctx.tracker.length(Color::Z) < n {
                self.extend(next)?
            } else {
                false
            };

            if found {
                return Ok(true);
            }
            self.ctx.stats.dead_ends += 1;
            self.ctx.tracker.rewind(checkpoint);
            if newly_marked {
                self.visited.remove(next);
            }
        }

        Ok(false)
    }
}

impl SearchEngine for SimplePathSearch<'_> {
    fn run(&mut self) -> Result<Verdict, Timeout> {
        self.ctx.enter()?;
        let seeds = self.seeds();
        let n = self.ctx.vertex_count();

        for (index, seed) in seeds.iter().enumerate() {
            let checkpoint = self.ctx.tracker.checkpoint();
            if let Some(walk_start) = self.plant(*seed) {
                debug!(
                    seed = index,
                    total = seeds.len(),
                    walk_start,
                    "exploring seed"
                );
                if self.extend(walk_start)? {
                    return Ok(Verdict::Decomposable(self.ctx.decomposition()));
                }
            }
            self.ctx.tracker.rewind(checkpoint);
            self.visited = VertexSet::new(n);
        }

        Ok(Verdict::NotDecomposable)
    }

    fn stats(&self) -> SearchStats {
        self.ctx.stats
    }
}
