//! Seeded generation of random test cases

use crate::io::dataset::TestCase;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Seeded random source of cycles and test cases
pub struct CaseGenerator {
    rng: StdRng,
}

impl CaseGenerator {
    /// Create a deterministic generator
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniformly random vertex order of `1..=n`
    pub fn random_cycle(&mut self, n: usize) -> Vec<usize> {
        let mut cycle: Vec<usize> = (1..=n).collect();
        cycle.shuffle(&mut self.rng);
        cycle
    }

    /// Random pyramidal vertex order of `1..=n`
    ///
    /// A random permutation is split before `n`; the part before it is sorted
    /// ascending and the part from `n` onwards descending, so labels rise to
    /// the peak `n` and fall again.
    pub fn pyramidal_cycle(&mut self, n: usize) -> Vec<usize> {
        let mut cycle = self.random_cycle(n);
        let peak = cycle.iter().position(|&label| label == n).unwrap_or(0);
        let (ascending, descending) = cycle.split_at_mut(peak);
        ascending.sort_unstable();
        descending.sort_unstable_by(|a, b| b.cmp(a));
        cycle
    }

    /// `times` cases of two independent random cycles on `n` vertices
    pub fn random_cases(&mut self, n: usize, times: usize) -> Vec<TestCase> {
        (0..times)
            .map(|_| {
                let x = self.random_cycle(n);
                let y = self.random_cycle(n);
                TestCase::new(x, y)
            })
            .collect()
    }

    /// `times` cases of two independent pyramidal cycles on `n` vertices
    pub fn pyramidal_cases(&mut self, n: usize, times: usize) -> Vec<TestCase> {
        (0..times)
            .map(|_| {
                let x = self.pyramidal_cycle(n);
                let y = self.pyramidal_cycle(n);
                TestCase::new(x, y)
            })
            .collect()
    }
}
