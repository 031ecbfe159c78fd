//! Seeded Gaussian-cluster classification data.

use super::dataset::{DataSplits, Dataset};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Shape of a synthetic problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    /// Number of classes.
    pub classes: usize,
    /// Features per sample.
    pub features: usize,
    /// Training samples.
    pub train_samples: usize,
    /// Test samples.
    pub test_samples: usize,
    /// Standard deviation of each cluster around its centre.
    pub spread: f32,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self { classes: 10, features: 64, train_samples: 2000, test_samples: 500, spread: 1.0 }
    }
}

/// Standard normal sample (Box-Muller).
fn standard_normal(rng: &mut StdRng) -> f32 {
    let u1: f32 = rng.random::<f32>().max(f32::MIN_POSITIVE);
    let u2: f32 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
}

fn sample(centres: &Array2<f32>, n: usize, spread: f32, rng: &mut StdRng) -> Result<Dataset> {
    let classes = centres.nrows();
    let labels = Array1::from_iter((0..n).map(|_| rng.random_range(0..classes)));
    let mut features = Array2::zeros((n, centres.ncols()));
    for (mut row, &label) in features.rows_mut().into_iter().zip(labels.iter()) {
        for (x, &c) in row.iter_mut().zip(centres.row(label).iter()) {
            *x = c + spread * standard_normal(rng);
        }
    }
    Dataset::new(features, labels, classes)
}

/// Generate train and test sets drawn from the same clusters.
pub fn generate(config: &SyntheticConfig, seed: u64) -> Result<DataSplits> {
    if config.classes < 2 || config.features == 0 {
        return Err(Error::InvalidParameter(format!(
            "synthetic data needs at least 2 classes and 1 feature (got {} and {})",
            config.classes, config.features
        )));
    }
    if config.train_samples == 0 || config.test_samples == 0 {
        return Err(Error::InvalidParameter("synthetic sample counts must be positive".into()));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let centres = Array2::from_shape_fn((config.classes, config.features), |_| {
        rng.random_range(-1.0f32..1.0)
    });
    let train = sample(&centres, config.train_samples, config.spread, &mut rng)?;
    let test = sample(&centres, config.test_samples, config.spread, &mut rng)?;
    DataSplits::new(train, test)
}
