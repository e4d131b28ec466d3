//! How many tokens a run mints

use std::ops::RangeInclusive;

use rand::Rng;

/// Inclusive bounds on the number of mints in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintRange {
    min: usize,
    max: usize,
}

impl MintRange {
    /// Returns `None` when `min > max`.
    pub fn new(min: usize, max: usize) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Uniform pick in `min..=max`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.random_range(self.min..=self.max)
    }

    pub fn contains(&self, count: usize) -> bool {
        self.as_range().contains(&count)
    }

    fn as_range(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

impl Default for MintRange {
    fn default() -> Self {
        Self { min: 10, max: 20 }
    }
}
