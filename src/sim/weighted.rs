//! Cumulative-threshold weighted selection
//!
//! Shared by spawn-type and loot-quality rolls: draw uniform [0,1), walk the
//! table accumulating weights, take the first entry whose cumulative sum
//! exceeds the draw. Tables are renormalized to sum to 1 before use so
//! difficulty-adjusted weights can be written without bookkeeping.

use rand::Rng;

/// A weight table over categories of type `T`.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<(T, f32)>,
}

impl<T: Copy> WeightedTable<T> {
    /// Build a table, dropping non-positive weights and renormalizing the
    /// rest to sum to 1. Returns `None` if no positive weight remains.
    pub fn new(entries: impl IntoIterator<Item = (T, f32)>) -> Option<Self> {
        let entries: Vec<(T, f32)> = entries.into_iter().filter(|&(_, w)| w > 0.0).collect();
        let total: f32 = entries.iter().map(|&(_, w)| w).sum();
        if total <= 0.0 {
            return None;
        }
        let entries = entries.into_iter().map(|(t, w)| (t, w / total)).collect();
        Some(Self { entries })
    }

    /// Sum of normalized weights (1.0 within float tolerance).
    pub fn total_weight(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w).sum()
    }

    /// Select the category for a draw value in [0, 1).
    ///
    /// The last entry absorbs any residual from float rounding, so every
    /// in-range draw maps to a category with positive weight.
    pub fn select(&self, draw: f32) -> T {
        let mut cumulative = 0.0;
        for &(category, weight) in &self.entries {
            cumulative += weight;
            if draw < cumulative {
                return category;
            }
        }
        self.entries[self.entries.len() - 1].0
    }

    /// Select using a uniform draw from `rng`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> T {
        self.select(rng.random::<f32>())
    }
}
