//! Two-layer dense classifier
//!
//! `Dense(inputs -> units, ReLU) -> Dropout -> Dense(units -> classes)`,
//! trained with softmax cross-entropy on the logits. Weight matrix 0 is the
//! hidden kernel, matrix 1 the output kernel.

use super::loss::{argmax_rows, cross_entropy_grad, cross_entropy_sum, softmax_rows};
use super::trainable::{Evaluation, Trainable};
use crate::data::Split;
use crate::error::{Error, Result};
use crate::optim::Optimizer;
use crate::prune::WeightConstraint;
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Rows evaluated per forward pass.
const EVAL_BATCH: usize = 1024;

/// Index of the hidden kernel.
pub const HIDDEN: usize = 0;
/// Index of the output kernel.
pub const OUTPUT: usize = 1;

/// Architecture and training-loop settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Input features.
    pub inputs: usize,
    /// Hidden units.
    pub hidden_units: usize,
    /// Output classes.
    pub classes: usize,
    /// Dropout rate after the hidden layer.
    pub dropout: f32,
    /// Mini-batch size.
    pub batch_size: usize,
    /// Seed for initialization, shuffling and dropout.
    pub seed: u64,
}

impl ClassifierConfig {
    /// Defaults for a given problem size (dropout 0.2, batch 32, seed 42).
    pub fn new(inputs: usize, hidden_units: usize, classes: usize) -> Self {
        Self { inputs, hidden_units, classes, dropout: 0.2, batch_size: 32, seed: 42 }
    }

    /// Set the dropout rate.
    pub fn with_dropout(mut self, dropout: f32) -> Self {
        self.dropout = dropout;
        self
    }

    /// Set the mini-batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.inputs == 0 || self.hidden_units == 0 || self.classes == 0 {
            return Err(Error::InvalidParameter(format!(
                "layer sizes must be positive (inputs={}, hidden_units={}, classes={})",
                self.inputs, self.hidden_units, self.classes
            )));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidParameter("batch_size must be positive".into()));
        }
        if !(0.0..1.0).contains(&self.dropout) {
            return Err(Error::InvalidParameter(format!(
                "dropout ({}) must be in [0.0, 1.0)",
                self.dropout
            )));
        }
        Ok(())
    }
}

struct Gradients {
    w1: Array2<f32>,
    b1: Array1<f32>,
    w2: Array2<f32>,
    b2: Array1<f32>,
}

/// Dense ReLU classifier with dropout.
pub struct DenseClassifier {
    config: ClassifierConfig,
    w1: Array2<f32>,
    b1: Array1<f32>,
    w2: Array2<f32>,
    b2: Array1<f32>,
    optimizer: Box<dyn Optimizer>,
    rng: StdRng,
}

impl std::fmt::Debug for DenseClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DenseClassifier")
            .field("config", &self.config)
            .field("optimizer", &self.optimizer.name())
            .finish_non_exhaustive()
    }
}

/// Glorot-uniform kernel.
fn glorot_uniform(rng: &mut StdRng, fan_in: usize, fan_out: usize) -> Array2<f32> {
    let limit = (6.0 / (fan_in + fan_out) as f32).sqrt();
    Array2::from_shape_fn((fan_in, fan_out), |_| rng.random_range(-limit..limit))
}

impl DenseClassifier {
    /// Build and initialize a classifier.
    pub fn new(config: ClassifierConfig, optimizer: Box<dyn Optimizer>) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let w1 = glorot_uniform(&mut rng, config.inputs, config.hidden_units);
        let w2 = glorot_uniform(&mut rng, config.hidden_units, config.classes);
        Ok(Self {
            b1: Array1::zeros(config.hidden_units),
            b2: Array1::zeros(config.classes),
            w1,
            w2,
            optimizer,
            rng,
            config,
        })
    }

    /// Architecture settings.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Optimizer in use.
    pub fn optimizer(&self) -> &dyn Optimizer {
        self.optimizer.as_ref()
    }

    /// Mutable access to a weight matrix (for tests and warm starts).
    pub fn weights_mut(&mut self, index: usize) -> Option<&mut Array2<f32>> {
        match index {
            HIDDEN => Some(&mut self.w1),
            OUTPUT => Some(&mut self.w2),
            _ => None,
        }
    }

    /// Logits for `x` without dropout.
    pub fn logits(&self, x: ArrayView2<'_, f32>) -> Array2<f32> {
        let hidden = (x.dot(&self.w1) + &self.b1).mapv(|v| v.max(0.0));
        hidden.dot(&self.w2) + &self.b2
    }

    fn check_split(&self, split: &Split<'_>) -> Result<()> {
        if split.features.ncols() != self.config.inputs {
            return Err(Error::ShapeMismatch {
                expected: (split.len(), self.config.inputs),
                actual: split.features.dim(),
            });
        }
        if let Some(&bad) = split.labels.iter().find(|&&l| l >= self.config.classes) {
            return Err(Error::Data(format!(
                "label {bad} out of range for {} classes",
                self.config.classes
            )));
        }
        Ok(())
    }

    /// Forward with dropout and backward for one mini-batch.
    fn gradients(&mut self, x: ArrayView2<'_, f32>, y: ArrayView1<'_, usize>) -> Gradients {
        let pre = x.dot(&self.w1) + &self.b1;
        let p = self.config.dropout;
        let scale = 1.0 / (1.0 - p);
        let rng = &mut self.rng;
        let keep = Array2::from_shape_fn(pre.raw_dim(), |_| {
            if p > 0.0 && rng.random::<f32>() < p {
                0.0
            } else {
                scale
            }
        });
        let relu_gate = pre.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 });
        let hidden = pre.mapv(|v| v.max(0.0)) * &keep;

        let logits = hidden.dot(&self.w2) + &self.b2;
        let probs = softmax_rows(logits.view());
        let d_logits = cross_entropy_grad(probs.view(), y);

        let w2 = hidden.t().dot(&d_logits);
        let b2 = d_logits.sum_axis(Axis(0));
        let d_hidden = d_logits.dot(&self.w2.t()) * &keep * &relu_gate;
        let w1 = x.t().dot(&d_hidden);
        let b1 = d_hidden.sum_axis(Axis(0));
        Gradients { w1, b1, w2, b2 }
    }

    fn apply(&mut self, grads: &Gradients, constraint: &dyn WeightConstraint) -> Result<()> {
        let opt = &mut self.optimizer;
        opt.begin_step();
        opt.update(0, self.w1.view_mut().into_dyn(), grads.w1.view().into_dyn());
        opt.update(1, self.b1.view_mut().into_dyn(), grads.b1.view().into_dyn());
        opt.update(2, self.w2.view_mut().into_dyn(), grads.w2.view().into_dyn());
        opt.update(3, self.b2.view_mut().into_dyn(), grads.b2.view().into_dyn());
        constraint.constrain(HIDDEN, &mut self.w1)?;
        constraint.constrain(OUTPUT, &mut self.w2)?;
        Ok(())
    }
}

impl Trainable for DenseClassifier {
    fn weight_shapes(&self) -> Vec<(usize, usize)> {
        vec![self.w1.dim(), self.w2.dim()]
    }

    fn weights(&self, index: usize) -> Option<&Array2<f32>> {
        match index {
            HIDDEN => Some(&self.w1),
            OUTPUT => Some(&self.w2),
            _ => None,
        }
    }

    fn bias_count(&self) -> usize {
        self.b1.len() + self.b2.len()
    }

    fn train_epoch(&mut self, split: Split<'_>, constraint: &dyn WeightConstraint) -> Result<()> {
        self.check_split(&split)?;
        let mut order: Vec<usize> = (0..split.len()).collect();
        order.shuffle(&mut self.rng);

        for batch in order.chunks(self.config.batch_size) {
            let x = split.features.select(Axis(0), batch);
            let y = split.labels.select(Axis(0), batch);
            let grads = self.gradients(x.view(), y.view());
            self.apply(&grads, constraint)?;
        }
        Ok(())
    }

    fn evaluate(&self, split: Split<'_>) -> Result<Evaluation> {
        self.check_split(&split)?;
        if split.is_empty() {
            return Err(Error::Data("cannot evaluate an empty split".into()));
        }

        let mut loss = 0.0;
        let mut correct = 0usize;
        let mut start = 0;
        while start < split.len() {
            let end = (start + EVAL_BATCH).min(split.len());
            let x = split.features.slice(s![start..end, ..]);
            let y = split.labels.slice(s![start..end]);
            let logits = self.logits(x);
            loss += cross_entropy_sum(softmax_rows(logits.view()).view(), y);
            correct += argmax_rows(logits.view())
                .iter()
                .zip(y.iter())
                .filter(|(p, t)| p == t)
                .count();
            start = end;
        }

        let n = split.len() as f64;
        Ok(Evaluation { loss: loss / n, accuracy: correct as f64 / n })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate, SyntheticConfig};
    use crate::optim::Adam;
    use crate::prune::{Mask, MaskStore, Unconstrained};
    use ndarray::array;

    fn problem() -> crate::data::DataSplits {
        let cfg = SyntheticConfig {
            classes: 3,
            features: 6,
            train_samples: 300,
            test_samples: 90,
            spread: 0.4,
        };
        generate(&cfg, 3).unwrap()
    }

    fn model(hidden: usize) -> DenseClassifier {
        let cfg = ClassifierConfig::new(6, hidden, 3).with_seed(9);
        DenseClassifier::new(cfg, Box::new(Adam::default_params(0.01))).unwrap()
    }

    #[test]
    fn test_shapes_and_bias_count() {
        let m = model(8);
        assert_eq!(m.weight_shapes(), vec![(6, 8), (8, 3)]);
        assert_eq!(m.bias_count(), 11);
        assert!(m.weights(2).is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = ClassifierConfig::new(6, 0, 3);
        assert!(DenseClassifier::new(cfg, Box::new(Adam::default_params(0.01))).is_err());
        let cfg = ClassifierConfig::new(6, 4, 3).with_dropout(1.0);
        assert!(DenseClassifier::new(cfg, Box::new(Adam::default_params(0.01))).is_err());
    }

    #[test]
    fn test_training_reduces_loss() {
        let data = problem();
        let mut m = model(16);
        let before = m.evaluate(data.train.view()).unwrap();
        for _ in 0..5 {
            m.train_epoch(data.train.view(), &Unconstrained).unwrap();
        }
        let after = m.evaluate(data.train.view()).unwrap();
        assert!(after.loss < before.loss);
        assert!(after.accuracy > 0.6);
    }

    #[test]
    fn test_constraint_applied_every_step() {
        let data = problem();
        let mut m = model(4);
        let mut store = MaskStore::initialize(&m.weight_shapes());
        let mut keep = Array2::from_elem((4, 3), true);
        keep[[0, 0]] = false;
        keep[[3, 2]] = false;
        store.replace(OUTPUT, Mask::from_keep(keep)).unwrap();

        m.train_epoch(data.train.view(), &store).unwrap();

        let w2 = m.weights(OUTPUT).unwrap();
        assert_eq!(w2[[0, 0]], 0.0);
        assert_eq!(w2[[3, 2]], 0.0);
        assert!(m.weights(HIDDEN).unwrap().iter().all(|w| *w != 0.0));
    }

    #[test]
    fn test_same_seed_same_weights() {
        let data = problem();
        let mut a = model(5);
        let mut b = model(5);
        a.train_epoch(data.train.view(), &Unconstrained).unwrap();
        b.train_epoch(data.train.view(), &Unconstrained).unwrap();
        assert_eq!(a.weights(HIDDEN), b.weights(HIDDEN));
    }

    #[test]
    fn test_feature_mismatch_rejected() {
        let m = model(4);
        let features = Array2::<f32>::zeros((2, 5));
        let labels = array![0, 1];
        let split = Split { features: features.view(), labels: labels.view() };
        assert!(matches!(m.evaluate(split), Err(Error::ShapeMismatch { .. })));
    }

    #[test]
    fn test_evaluate_empty_split() {
        let m = model(4);
        let data = problem();
        let (_, held) = data.train.holdback(0.0).unwrap();
        assert!(matches!(m.evaluate(held), Err(Error::Data(_))));
    }
}
