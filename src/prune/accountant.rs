//! Effective parameter bookkeeping.

use crate::prune::mask::Mask;
use serde::{Deserialize, Serialize};

/// Counts active weights against the dense parameter count.
///
/// The fixed overhead covers parameters no mask can remove (the biases).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterAccountant {
    fixed_overhead: usize,
    upper_bound: usize,
}

impl ParameterAccountant {
    /// Create an accountant for weight matrices of `dense_sizes` entries.
    pub fn new(dense_sizes: &[usize], fixed_overhead: usize) -> Self {
        Self { fixed_overhead, upper_bound: upper_bound(dense_sizes, fixed_overhead) }
    }

    /// Accountant whose dense sizes are taken from matrix shapes.
    pub fn from_shapes(shapes: &[(usize, usize)], fixed_overhead: usize) -> Self {
        let sizes: Vec<usize> = shapes.iter().map(|(r, c)| r * c).collect();
        Self::new(&sizes, fixed_overhead)
    }

    /// Dense parameter count, constant for the whole run.
    pub fn upper_bound(&self) -> usize {
        self.upper_bound
    }

    /// Active weights under `masks` plus the fixed overhead.
    pub fn count_active(&self, masks: &[Mask]) -> usize {
        count_active(masks, self.fixed_overhead)
    }
}

/// Sum of kept mask entries plus `fixed_overhead`.
pub fn count_active(masks: &[Mask], fixed_overhead: usize) -> usize {
    masks.iter().map(Mask::count_active).sum::<usize>() + fixed_overhead
}

/// Sum of dense sizes plus `fixed_overhead`.
pub fn upper_bound(dense_sizes: &[usize], fixed_overhead: usize) -> usize {
    dense_sizes.iter().sum::<usize>() + fixed_overhead
}
