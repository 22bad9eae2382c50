//! Structural checks on sets of same-colour edges

/// Cycle detection for directed and undirected edge sets
pub mod cycles;
/// Hamiltonian cycle verification and vertex ordering
pub mod hamiltonian;
