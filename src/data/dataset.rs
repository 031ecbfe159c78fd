//! In-memory labelled datasets and borrowed splits.

use crate::error::{Error, Result};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

/// Feature matrix (one row per sample) with class-index labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f32>,
    labels: Array1<usize>,
    num_classes: usize,
}

impl Dataset {
    /// Create a dataset, checking that rows and labels line up.
    pub fn new(features: Array2<f32>, labels: Array1<usize>, num_classes: usize) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(Error::Data(format!(
                "{} feature rows but {} labels",
                features.nrows(),
                labels.len()
            )));
        }
        if let Some(&bad) = labels.iter().find(|&&l| l >= num_classes) {
            return Err(Error::Data(format!("label {bad} out of range for {num_classes} classes")));
        }
        Ok(Self { features, labels, num_classes })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset has no samples.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of features per sample.
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    /// Number of classes.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Feature matrix.
    pub fn features(&self) -> &Array2<f32> {
        &self.features
    }

    /// Labels.
    pub fn labels(&self) -> &Array1<usize> {
        &self.labels
    }

    /// Borrow the whole dataset as a split.
    pub fn view(&self) -> Split<'_> {
        Split { features: self.features.view(), labels: self.labels.view() }
    }

    /// Split off the last `fraction` of the samples as a held-back set.
    ///
    /// The first `floor(n * (1 - fraction))` samples form the training part.
    /// No shuffling happens, so the split is reproducible across runs.
    pub fn holdback(&self, fraction: f64) -> Result<(Split<'_>, Split<'_>)> {
        if !(0.0..1.0).contains(&fraction) {
            return Err(Error::InvalidParameter(format!(
                "holdback fraction ({fraction}) must be in [0.0, 1.0)"
            )));
        }
        let span = (self.len() as f64 * (1.0 - fraction)) as usize;
        let all = self.view();
        Ok((all.slice(0, span), all.slice(span, self.len())))
    }
}

/// Borrowed rows of a [`Dataset`].
#[derive(Debug, Clone, Copy)]
pub struct Split<'a> {
    /// Feature rows.
    pub features: ArrayView2<'a, f32>,
    /// Labels for the rows.
    pub labels: ArrayView1<'a, usize>,
}

impl<'a> Split<'a> {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the split has no samples.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Rows `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Split<'a> {
        Split {
            features: self.features.slice_move(s![start..end, ..]),
            labels: self.labels.slice_move(s![start..end]),
        }
    }
}

/// Training and test datasets of one problem.
#[derive(Debug, Clone)]
pub struct DataSplits {
    /// Training set (held-back samples are carved from its tail).
    pub train: Dataset,
    /// Test set.
    pub test: Dataset,
}

impl DataSplits {
    /// Pair `train` and `test`, checking they describe the same problem.
    pub fn new(train: Dataset, test: Dataset) -> Result<Self> {
        if train.num_features() != test.num_features() {
            return Err(Error::Data(format!(
                "train has {} features, test has {}",
                train.num_features(),
                test.num_features()
            )));
        }
        if train.num_classes() != test.num_classes() {
            return Err(Error::Data(format!(
                "train has {} classes, test has {}",
                train.num_classes(),
                test.num_classes()
            )));
        }
        Ok(Self { train, test })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn tiny() -> Dataset {
        let features = Array2::from_shape_fn((10, 2), |(i, j)| (i * 2 + j) as f32);
        let labels = Array1::from_iter((0..10).map(|i| i % 3));
        Dataset::new(features, labels, 3).unwrap()
    }

    #[test]
    fn test_new_rejects_row_mismatch() {
        let err = Dataset::new(Array2::zeros((3, 2)), array![0, 1], 2).unwrap_err();
        assert!(matches!(err, Error::Data(_)));
    }

    #[test]
    fn test_new_rejects_label_out_of_range() {
        assert!(Dataset::new(Array2::zeros((2, 2)), array![0, 2], 2).is_err());
    }

    #[test]
    fn test_holdback_zero_keeps_everything() {
        let data = tiny();
        let (train, held) = data.holdback(0.0).unwrap();
        assert_eq!(train.len(), 10);
        assert!(held.is_empty());
    }

    #[test]
    fn test_holdback_takes_tail() {
        let data = tiny();
        let (train, held) = data.holdback(0.25).unwrap();
        // floor(10 * 0.75) = 7
        assert_eq!(train.len(), 7);
        assert_eq!(held.len(), 3);
        assert_eq!(held.features[[0, 0]], 14.0);
        assert_eq!(held.labels[0], 7 % 3);
    }

    #[test]
    fn test_holdback_rejects_out_of_range() {
        let data = tiny();
        assert!(data.holdback(1.0).is_err());
        assert!(data.holdback(-0.1).is_err());
    }

    #[test]
    fn test_splits_must_agree() {
        let a = tiny();
        let b = Dataset::new(Array2::zeros((2, 3)), array![0, 1], 3).unwrap();
        assert!(DataSplits::new(a.clone(), b).is_err());
        assert!(DataSplits::new(a.clone(), a).is_ok());
    }
}
