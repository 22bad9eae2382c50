use bitvec::prelude::*;
use std::fmt;

/// Fixed-size set of vertex labels
///
/// Uses 1-based indexing to match vertex labels throughout the system.
/// Labels outside `1..=capacity` are never members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexSet {
    bits: BitVec,
    capacity: usize,
}

impl VertexSet {
    /// Create a set able to hold labels `1..=capacity`, initially empty
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
            capacity,
        }
    }

    /// Insert a label, returning whether it was newly added
    pub fn insert(&mut self, label: usize) -> bool {
        if label == 0 || label > self.capacity || self.contains(label) {
            return false;
        }
        self.bits.set(label - 1, true);
        true
    }

    /// Remove a label, returning whether it was present
    pub fn remove(&mut self, label: usize) -> bool {
        if !self.contains(label) {
            return false;
        }
        self.bits.set(label - 1, false);
        true
    }

    /// Test label membership
    pub fn contains(&self, label: usize) -> bool {
        label
            .checked_sub(1)
            .and_then(|index| self.bits.get(index).as_deref().copied())
            .unwrap_or(false)
    }

    /// Number of labels in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no labels are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// All member labels in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().map(|index| index + 1).collect()
    }
}

impl fmt::Display for VertexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexSet({} vertices: {:?})", self.count(), self.to_vec())
    }
}
