//! Union multigraph of two cycles and the mutable edge colouring searched over

/// Edge colour assignment with checkpoint and rewind
pub mod edge_state;
/// Arena multigraph built from two cyclic vertex orders
pub mod multigraph;
/// Bitset of vertex labels
pub mod vertex_set;
