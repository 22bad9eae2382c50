//! Input/output around the search: datasets, command line, reporting and rendering

/// Command-line parsing and batch orchestration
pub mod cli;
/// Search constants and runtime defaults
pub mod configuration;
/// Test cases and dataset file import
pub mod dataset;
/// Error types and context helpers
pub mod error;
/// Seeded random case generation
pub mod generator;
/// PNG rendering of decompositions
pub mod image;
/// Progress bars for batch runs
pub mod progress;
/// Result table of a run
pub mod report;
