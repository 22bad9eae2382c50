//! Error types and context helpers for harness operations

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for everything outside the search core
#[derive(Debug, Error)]
pub enum AdjacencyError {
    /// The two cycles of a test case have different lengths
    #[error("Cycle lengths differ: X has {x} vertices, Y has {y}")]
    LengthMismatch {
        /// Length of X
        x: usize,
        /// Length of Y
        y: usize,
    },

    /// A cycle is not a permutation of `1..=n` for a usable `n`
    #[error("Cycle {cycle} is invalid: {reason}")]
    InvalidCycle {
        /// Which cycle failed validation ("X" or "Y")
        cycle: &'static str,
        /// Explanation of the defect
        reason: String,
    },

    /// Both cycles have the same edge set in the chosen orientation
    #[error("Cycles X and Y have the same {orientation} edge set")]
    EqualCycles {
        /// Orientation the comparison was made in
        orientation: &'static str,
    },

    /// Parameter validation failed
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A dataset file could not be parsed
    #[error("Failed to parse '{}' at line {line}: {reason}", path.display())]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// 1-based line number of the offending input
        line: usize,
        /// Description of what was expected
        reason: String,
    },

    /// Failed to save a rendered decomposition
    #[error("Failed to export image to '{}': {source}", path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Convenience type alias for harness results
pub type Result<T> = std::result::Result<T, AdjacencyError>;

/// Build an [`AdjacencyError::InvalidParameter`]
pub fn invalid_parameter(
    parameter: &'static str,
    value: impl ToString,
    reason: impl Into<String>,
) -> AdjacencyError {
    AdjacencyError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Build an [`AdjacencyError::Parse`]
pub fn parse_error(path: &Path, line: usize, reason: impl Into<String>) -> AdjacencyError {
    AdjacencyError::Parse {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}

/// Build an [`AdjacencyError::FileSystem`]
pub fn io_error(path: &Path, operation: &'static str, source: std::io::Error) -> AdjacencyError {
    AdjacencyError::FileSystem {
        path: path.to_path_buf(),
        operation,
        source,
    }
}

/// Enriches I/O failures with the file and operation involved
pub trait WithContext<T> {
    /// Attach the path and operation to an I/O error
    ///
    /// # Errors
    ///
    /// Propagates the original error as [`AdjacencyError::FileSystem`]
    fn with_file(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithContext<T> for std::result::Result<T, std::io::Error> {
    fn with_file(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| io_error(path, operation, source))
    }
}
