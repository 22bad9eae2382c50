//! Forced-propagation engine
//!
//! Branches on the most constrained port, fixing one of its free edges to Z
//! and letting the propagator close every port whose quota fills up.

use crate::{
    algorithm::{
        propagation::{Propagation, fix_edge, split_multiedges},
        search::{SearchContext, SearchEngine, SearchStats, Verdict},
        selection::select_branch_port,
        timeout::{Timeout, TimeoutGuard},
    },
    graph::{
        edge_state::Color,
        multigraph::{EdgeId, Multigraph},
    },
};
use tracing::{debug, trace};

/// Depth-first search over propagated edge assignments
pub struct ChainFixingSearch<'a> {
    ctx: SearchContext<'a>,
}

impl<'a> ChainFixingSearch<'a> {
    /// Engine over `graph` with every edge free
    pub fn new(graph: &'a Multigraph, guard: TimeoutGuard) -> Self {
        Self {
            ctx: SearchContext::new(graph, guard),
        }
    }

    fn has_premature_cycle(&self) -> bool {
        self.ctx.has_premature_cycle(Color::Z) || self.ctx.has_premature_cycle(Color::W)
    }

    /// Branch over the free edges of the most constrained port
    fn branch(&mut self, depth: usize) -> Result<bool, Timeout> {
        self.ctx.enter()?;
        let graph = self.ctx.graph;
        let Some(port) = select_branch_port(graph, &self.ctx.tracker) else {
            return Ok(self.ctx.accepts_closure());
        };

        let candidates: Vec<EdgeId> = graph
            .port_edges(port)
            .iter()
            .copied()
            .filter(|&edge| self.ctx.tracker.is_free(edge))
            .collect();
        if depth == 0 {
            debug!(
                vertex = port.vertex,
                side = ?port.side,
                candidates = candidates.len(),
                "root branch port"
            );
        }

        for edge in candidates {
            if self.descend(edge, depth)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Fix `edge` to Z, propagate, and continue below the result
    ///
    /// Every edge fixed here is unfixed again unless a decomposition is found.
    fn descend(&mut self, edge: EdgeId, depth: usize) -> Result<bool, Timeout> {
        let checkpoint = self.ctx.tracker.checkpoint();
        let fixed = match fix_edge(self.ctx.graph, &mut self.ctx.tracker, edge, Color::Z) {
            Propagation::Consistent(fixed) => fixed,
            Propagation::Conflict => {
                self.ctx.stats.dead_ends += 1;
                return Ok(false);
            }
        };
        trace!(
            depth,
            z = fixed.z.len(),
            w = fixed.w.len(),
            length_z = self.ctx.tracker.length(Color::Z),
            length_w = self.ctx.tracker.length(Color::W),
            "propagated"
        );

        let found = if self.ctx.is_complete() {
            self.ctx.accepts_closure()
        } else if self.has_premature_cycle() {
            false
        } else {
            self.branch(depth + 1)?
        };

        if !found {
            self.ctx.stats.dead_ends += 1;
            self.ctx.tracker.rewind(checkpoint);
        }
        Ok(found)
    }
}

impl SearchEngine for ChainFixingSearch<'_> {
    fn run(&mut self) -> Result<Verdict, Timeout> {
        self.ctx.enter()?;
        match split_multiedges(self.ctx.graph, &mut self.ctx.tracker) {
            Propagation::Conflict => {
                debug!("doubled edges cannot be split");
                return Ok(Verdict::NotDecomposable);
            }
            Propagation::Consistent(fixed) => {
                debug!(z = fixed.z.len(), w = fixed.w.len(), "doubled edges split");
            }
        }

        let found = if self.ctx.is_complete() {
            self.ctx.accepts_closure()
        } else if self.has_premature_cycle() {
            false
        } else {
            self.branch(0)?
        };

        Ok(if found {
            Verdict::Decomposable(self.ctx.decomposition())
        } else {
            Verdict::NotDecomposable
        })
    }

    fn stats(&self) -> SearchStats {
        self.ctx.stats
    }
}
