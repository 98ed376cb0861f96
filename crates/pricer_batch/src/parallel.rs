//! Rayon fan-out for per-instrument work.
//!
//! Work items within a valuation date are independent, so they are mapped
//! with `par_iter` once there are enough of them to pay for the thread
//! hand-off. Output order always matches input order.

use rayon::prelude::*;

/// When to fan out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Master switch
    pub enabled: bool,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            parallel_threshold: 64,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(enabled: bool, parallel_threshold: usize) -> Self {
        Self {
            enabled,
            parallel_threshold,
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        self.enabled && n_items >= self.parallel_threshold
    }

    /// Maps `items` through `mapper`, in parallel above the threshold.
    ///
    /// Returns the outputs in input order and whether threads were used.
    pub fn map<T, R, F>(&self, items: &[T], mapper: F) -> (Vec<R>, bool)
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.should_parallelize(items.len()) {
            (items.par_iter().map(mapper).collect(), true)
        } else {
            (items.iter().map(mapper).collect(), false)
        }
    }
}
