//! Magnitude-quantile threshold selection.
//!
//! Weights whose magnitude falls strictly below the `keep_fraction`-quantile
//! of the non-zero magnitudes are dropped; everything at or above the quantile
//! is kept. Exact zeros (weights an earlier mask already pinned) are excluded
//! from the quantile so that pruning compounds across epochs.

use crate::error::{Degeneracy, Error, Result};
use crate::prune::mask::Mask;
use ndarray::Array2;

/// Validate that a keep-fraction can be used as a quantile.
pub fn check_keep_fraction(keep_fraction: f64) -> Result<()> {
    if keep_fraction.is_finite() && keep_fraction > 0.0 && keep_fraction < 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter(format!(
            "keep_fraction ({keep_fraction}) must lie strictly between 0.0 and 1.0"
        )))
    }
}

/// Quantile of `values` with linear interpolation between closest ranks.
///
/// `values` is sorted in place. Returns `None` when it is empty.
pub fn quantile(values: &mut [f32], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable_by(f32::total_cmp);

    let pos = p.clamp(0.0, 1.0) * (values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let a = f64::from(values[lo]);
    let b = f64::from(values[hi]);
    Some(a + (b - a) * (pos - lo as f64))
}

/// Magnitude threshold for `weights`: the `keep_fraction`-quantile of its
/// non-zero absolute values.
///
/// `index` only labels the degeneracy error.
pub fn magnitude_threshold(weights: &Array2<f32>, keep_fraction: f64, index: usize) -> Result<f64> {
    check_keep_fraction(keep_fraction)?;

    let mut magnitudes: Vec<f32> = weights.iter().map(|w| w.abs()).filter(|&m| m != 0.0).collect();
    quantile(&mut magnitudes, keep_fraction)
        .ok_or_else(|| Degeneracy::EmptyMagnitudeSet { index }.into())
}

/// Mask dropping every weight of matrix `index` below the magnitude threshold.
pub fn compute_mask(weights: &Array2<f32>, keep_fraction: f64, index: usize) -> Result<Mask> {
    let q = magnitude_threshold(weights, keep_fraction, index)?;
    Ok(Mask::from_keep(weights.mapv(|w| f64::from(w.abs()) >= q)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use proptest::prelude::*;

    #[test]
    fn test_quantile_interpolates() {
        let mut v = vec![4.0, 1.0, 3.0, 2.0];
        // pos = 0.5 * 3 = 1.5 -> between 2.0 and 3.0
        assert_abs_diff_eq!(quantile(&mut v, 0.5).unwrap(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(quantile(&mut v, 0.0).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(quantile(&mut v, 1.0).unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quantile_empty() {
        assert!(quantile(&mut [], 0.5).is_none());
    }

    #[test]
    fn test_single_small_weight_dropped() {
        let mut weights = Array2::<f32>::ones((4, 4));
        weights[[2, 1]] = 0.01;

        let mask = compute_mask(&weights, 0.5, 0).unwrap();

        assert_eq!(mask.shape(), (4, 4));
        assert_eq!(mask.count_active(), 15);
        assert_eq!(mask.value(2, 1), 0);
    }

    #[test]
    fn test_zeros_excluded_and_dropped() {
        // Quantile is taken over [1, 2, 3, 4] only
        let weights = array![[0.0_f32, 1.0, -2.0], [0.0, 3.0, -4.0]];
        let q = magnitude_threshold(&weights, 0.5, 0).unwrap();
        assert_abs_diff_eq!(q, 2.5, epsilon = 1e-12);

        let mask = compute_mask(&weights, 0.5, 0).unwrap();
        assert_eq!(mask.to_binary(), array![[0_u8, 0, 0], [0, 1, 1]]);
    }

    #[test]
    fn test_ties_at_threshold_kept() {
        let weights = array![[0.5_f32, 0.5, 0.5, 0.5]];
        let mask = compute_mask(&weights, 0.4, 0).unwrap();
        assert_eq!(mask.count_active(), 4);
    }

    #[test]
    fn test_all_zero_is_degenerate() {
        let weights = Array2::<f32>::zeros((3, 3));
        let err = compute_mask(&weights, 0.4, 1).unwrap_err();
        assert!(matches!(err, Error::Degenerate(Degeneracy::EmptyMagnitudeSet { index: 1 })));
    }

    #[test]
    fn test_keep_fraction_bounds_rejected() {
        let weights = Array2::<f32>::ones((2, 2));
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                compute_mask(&weights, bad, 0),
                Err(Error::InvalidParameter(_))
            ));
        }
    }

    fn weights_strategy() -> impl Strategy<Value = Array2<f32>> {
        (1usize..8, 1usize..8).prop_flat_map(|(r, c)| {
            prop::collection::vec(-2.0f32..2.0, r * c)
                .prop_map(move |v| Array2::from_shape_vec((r, c), v).unwrap())
        })
    }

    proptest! {
        #[test]
        fn prop_mask_matches_shape(w in weights_strategy(), p in 0.01f64..0.99) {
            if let Ok(mask) = compute_mask(&w, p, 0) {
                prop_assert_eq!(mask.shape(), w.dim());
                prop_assert!(mask.to_binary().iter().all(|&v| v <= 1));
            }
        }

        #[test]
        fn prop_compute_mask_idempotent(w in weights_strategy(), p in 0.01f64..0.99) {
            let first = compute_mask(&w, p, 0).ok();
            let second = compute_mask(&w, p, 0).ok();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_zero_weights_never_kept(w in weights_strategy(), p in 0.01f64..0.99) {
            if let Ok(mask) = compute_mask(&w, p, 0) {
                for (weight, keep) in w.iter().zip(mask.keep().iter()) {
                    if *weight == 0.0 {
                        prop_assert!(!keep);
                    }
                }
            }
        }

        #[test]
        fn prop_largest_magnitude_survives(w in weights_strategy(), p in 0.01f64..0.99) {
            if let Ok(mask) = compute_mask(&w, p, 0) {
                let max = w.iter().fold(0.0f32, |m, x| m.max(x.abs()));
                prop_assert!(mask.count_active() >= 1 || max == 0.0);
            }
        }
    }
}
