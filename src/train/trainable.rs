//! Seam between the masking control loop and a trainable model.

use crate::data::Split;
use crate::error::Result;
use crate::prune::WeightConstraint;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Loss and accuracy of a model on one split.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Evaluation {
    /// Mean loss.
    pub loss: f64,
    /// Fraction of correctly classified samples.
    pub accuracy: f64,
}

/// A model whose maskable weight matrices the epoch driver can inspect.
///
/// The driver passes failures through unchanged and never retries.
/// [`DenseClassifier`](crate::train::DenseClassifier) reports bad splits as
/// [`Error::Data`](crate::Error::Data) or
/// [`Error::ShapeMismatch`](crate::Error::ShapeMismatch); other models can wrap
/// their own errors with [`Error::trainer`](crate::Error::trainer).
pub trait Trainable {
    /// Shapes of the maskable weight matrices, in index order.
    fn weight_shapes(&self) -> Vec<(usize, usize)>;

    /// Weight matrix `index`.
    fn weights(&self, index: usize) -> Option<&Array2<f32>>;

    /// Parameters no mask applies to (biases).
    fn bias_count(&self) -> usize;

    /// One optimizer pass over `split`.
    ///
    /// `constraint` must be applied to every weight matrix after every
    /// optimizer update.
    fn train_epoch(&mut self, split: Split<'_>, constraint: &dyn WeightConstraint) -> Result<()>;

    /// Loss and accuracy on `split`, without updating anything.
    fn evaluate(&self, split: Split<'_>) -> Result<Evaluation>;
}
