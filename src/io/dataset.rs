//! Test cases and the two dataset file formats they are imported from

use crate::{
    graph::multigraph::{Orientation, cycle_edge_set},
    io::{
        configuration::MIN_VERTEX_COUNT,
        error::{AdjacencyError, Result, WithContext, parse_error},
    },
};
use std::path::Path;

/// Marker preceding the vertex list of the first cycle in VNS logs
const VNS_FIRST_CYCLE: &str = "Initial Cycle 1:";
/// Marker preceding the vertex list of the second cycle in VNS logs
const VNS_SECOND_CYCLE: &str = "Initial Cycle 2:";
/// Lines following the two cycle lines of every VNS record
const VNS_TRAILING_LINES: usize = 8;

/// A pair of cyclic vertex orders to decide
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    /// First input cycle
    pub x: Vec<usize>,
    /// Second input cycle
    pub y: Vec<usize>,
}

impl TestCase {
    /// Pair two vertex orders
    pub const fn new(x: Vec<usize>, y: Vec<usize>) -> Self {
        Self { x, y }
    }

    /// Number of vertices of X
    pub const fn vertex_count(&self) -> usize {
        self.x.len()
    }

    /// The same case with X and Y exchanged
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self::new(self.y.clone(), self.x.clone())
    }

    /// Check that the case satisfies the search preconditions
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - X and Y have different lengths
    /// - Either cycle is not a permutation of `1..=n` with `n >= 3`
    /// - X and Y have the same edge set in `orientation`
    pub fn validate(&self, orientation: Orientation) -> Result<()> {
        if self.x.len() != self.y.len() {
            return Err(AdjacencyError::LengthMismatch {
                x: self.x.len(),
                y: self.y.len(),
            });
        }
        check_permutation("X", &self.x)?;
        check_permutation("Y", &self.y)?;

        if cycle_edge_set(orientation, &self.x) == cycle_edge_set(orientation, &self.y) {
            return Err(AdjacencyError::EqualCycles {
                orientation: orientation.label(),
            });
        }
        Ok(())
    }
}

fn check_permutation(name: &'static str, cycle: &[usize]) -> Result<()> {
    let n = cycle.len();
    if n < MIN_VERTEX_COUNT {
        return Err(AdjacencyError::InvalidCycle {
            cycle: name,
            reason: format!("needs at least {MIN_VERTEX_COUNT} vertices, found {n}"),
        });
    }

    let mut seen = vec![false; n];
    for &label in cycle {
        let slot = label.checked_sub(1).and_then(|index| seen.get_mut(index));
        match slot {
            Some(flag) if !*flag => *flag = true,
            Some(_) => {
                return Err(AdjacencyError::InvalidCycle {
                    cycle: name,
                    reason: format!("vertex {label} appears more than once"),
                });
            }
            None => {
                return Err(AdjacencyError::InvalidCycle {
                    cycle: name,
                    reason: format!("vertex {label} is outside 1..={n}"),
                });
            }
        }
    }
    Ok(())
}

fn parse_labels<'t>(
    tokens: impl Iterator<Item = &'t str>,
    path: &Path,
    line: usize,
) -> Result<Vec<usize>> {
    tokens
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|e| parse_error(path, line, format!("'{token}' is not a vertex: {e}")))
        })
        .collect()
}

/// Parse the plain dataset format
///
/// Every case is two lines of whitespace-separated vertex labels; cases are
/// separated by one or more blank lines. `path` is only used in errors.
///
/// # Errors
///
/// Returns an error if a block does not hold exactly two lines or a token
/// is not a non-negative integer
pub fn parse_plain(text: &str, path: &Path) -> Result<Vec<TestCase>> {
    let mut cases = Vec::new();
    let mut block: Vec<(usize, &str)> = Vec::new();

    let lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));
    for (number, line) in lines.chain(std::iter::once((0, ""))) {
        if !line.trim().is_empty() {
            block.push((number, line));
            continue;
        }
        match block.as_slice() {
            [] => {}
            [(x_line, x), (y_line, y)] => {
                let x_labels = parse_labels(x.split_whitespace(), path, *x_line)?;
                let y_labels = parse_labels(y.split_whitespace(), path, *y_line)?;
                cases.push(TestCase::new(x_labels, y_labels));
            }
            [(first, _), ..] => {
                return Err(parse_error(
                    path,
                    *first,
                    format!("expected two cycle lines, found {}", block.len()),
                ));
            }
        }
        block.clear();
    }

    Ok(cases)
}

/// Read and parse a plain dataset file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn import_from_file(path: &Path) -> Result<Vec<TestCase>> {
    let text = std::fs::read_to_string(path).with_file(path, "read dataset")?;
    parse_plain(&text, path)
}

/// Parse a VNS search log
///
/// Every record is a header line, a line holding `Initial Cycle 1:` followed
/// by labels separated by commas or whitespace, the matching `Initial Cycle 2:`
/// line, and eight further lines. Reading stops at the first incomplete record.
///
/// # Errors
///
/// Returns an error if a cycle line holds a token that is not a vertex label
pub fn parse_vns(text: &str, path: &Path) -> Result<Vec<TestCase>> {
    let mut cases = Vec::new();
    let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));

    loop {
        if lines.next().is_none() {
            break;
        }
        let Some(x) = next_cycle(&mut lines, VNS_FIRST_CYCLE, path)? else {
            break;
        };
        let Some(y) = next_cycle(&mut lines, VNS_SECOND_CYCLE, path)? else {
            break;
        };
        cases.push(TestCase::new(x, y));
        lines.by_ref().take(VNS_TRAILING_LINES).for_each(drop);
    }

    Ok(cases)
}

fn next_cycle<'t>(
    lines: &mut impl Iterator<Item = (usize, &'t str)>,
    marker: &str,
    path: &Path,
) -> Result<Option<Vec<usize>>> {
    let Some((number, line)) = lines.next() else {
        return Ok(None);
    };
    let Some((_, labels)) = line.split_once(marker) else {
        return Ok(None);
    };
    let tokens = labels.split(|c: char| c == ',' || c.is_whitespace());
    parse_labels(tokens, path, number).map(Some)
}

/// Read and parse a VNS log file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed
pub fn import_from_vns_file(path: &Path) -> Result<Vec<TestCase>> {
    let text = std::fs::read_to_string(path).with_file(path, "read VNS log")?;
    parse_vns(&text, path)
}
