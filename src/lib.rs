//! Backtracking search deciding whether the union of two Hamiltonian cycles
//! can be split into two other Hamiltonian cycles
//!
//! Four engines cover directed and undirected cycles, each either growing one
//! cycle as a path in vertex order or branching on edge choices and
//! propagating the colours they force.

#![forbid(unsafe_code)]

/// Search engines, propagation, timeouts and batch execution
pub mod algorithm;
/// Cycle detection and Hamiltonicity checks on edge sets
pub mod analysis;
/// Union multigraph and mutable edge colouring
pub mod graph;
/// Input/output operations and error handling
pub mod io;

pub use io::error::{AdjacencyError, Result};
