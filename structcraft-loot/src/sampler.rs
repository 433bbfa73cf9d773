//! Weighted random selection over arbitrary payloads.

use rand::Rng;
use thiserror::Error;

/// Errors from the weighted sampler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SamplerError {
    /// Weights must be positive; zero would create an empty interval.
    #[error("weight must be a positive integer")]
    ZeroWeight,

    /// Drawing from a sampler with no entries has no defined distribution.
    #[error("cannot draw from an empty sampler")]
    Empty,
}

#[derive(Debug, Clone)]
struct Entry<T> {
    /// Exclusive upper bound of this entry's interval in `[0, total)`.
    boundary: u64,
    value: T,
}

/// A reusable weighted-random-choice container.
///
/// Each entry owns the half-open interval between the previous cumulative
/// boundary and its own; a draw picks uniformly over `[0, total)` and
/// scans entries in insertion order until one covers the draw. Linear scan
/// is fine at loot-table scale (tens of entries).
#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    entries: Vec<Entry<T>>,
    total: u64,
}

impl<T> Default for WeightedSampler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WeightedSampler<T> {
    /// Creates an empty sampler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            total: 0,
        }
    }

    /// Adds a payload with a positive integer weight.
    pub fn add(&mut self, weight: u32, value: T) -> Result<(), SamplerError> {
        if weight == 0 {
            return Err(SamplerError::ZeroWeight);
        }
        self.total += u64::from(weight);
        self.entries.push(Entry {
            boundary: self.total,
            value,
        });
        Ok(())
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The sum of all inserted weights.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.total
    }

    /// Iterates over the payloads in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|entry| &entry.value)
    }

    /// Draws one payload with probability proportional to its weight.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T, SamplerError> {
        if self.entries.is_empty() {
            return Err(SamplerError::Empty);
        }
        let draw = rng.gen_range(0..self.total);
        for entry in &self.entries {
            if draw < entry.boundary {
                return Ok(&entry.value);
            }
        }
        // The last boundary equals `total`, so the scan always hits.
        Err(SamplerError::Empty)
    }
}
