/// Forced-propagation engine branching on the most constrained port
pub mod chain_fixing;
/// Batch execution of test cases under time limits
pub mod executor;
/// Edge fixing with transitive propagation of port quotas
pub mod propagation;
/// Shared search context, method catalogue and verdicts
pub mod search;
/// Branch port selection for the propagation engine
pub mod selection;
/// Vertex-order depth-first engine
pub mod simple_path;
/// Per-test and per-batch deadlines
pub mod timeout;
