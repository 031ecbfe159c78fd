//! Epoch driver: the per-epoch control loop around a [`Trainable`] model.
//!
//! ```text
//! Init -> { TrainEpoch -> Evaluate -> AdaptRate -> RecomputeMasks -> Account }* -> SelectBest -> Done
//! ```
//!
//! With a non-pruning strategy `AdaptRate` and `RecomputeMasks` are skipped.

use crate::data::{DataSplits, Split};
use crate::error::{Error, Result};
use crate::prune::accountant::ParameterAccountant;
use crate::prune::rate::LossWindow;
use crate::prune::record::{select_best, EpochRecord, TrainReport};
use crate::prune::strategy::{DegeneracyPolicy, DenseStrategy, MaskingStrategy, OccamStrategy, RateOutcome};
use crate::train::{CallbackManager, Evaluation, OccamCallback, RunContext, Trainable};
use ndarray::Array2;
use std::fmt;

/// Stage the driver is in (or last completed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStage {
    /// Constructed, no epoch run yet
    Init,
    /// Optimizer pass over the training part
    TrainEpoch,
    /// Evaluating train, test and held-back splits
    Evaluate,
    /// Updating the keep-fraction
    AdaptRate,
    /// Replacing the masks
    RecomputeMasks,
    /// Counting active parameters
    Account,
    /// Picking the minimum-test-loss epoch
    SelectBest,
    /// Run finished
    Done,
}

impl fmt::Display for DriverStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::TrainEpoch => "train_epoch",
            Self::Evaluate => "evaluate",
            Self::AdaptRate => "adapt_rate",
            Self::RecomputeMasks => "recompute_masks",
            Self::Account => "account",
            Self::SelectBest => "select_best",
            Self::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// Borrowed splits for one run.
#[derive(Debug, Clone, Copy)]
pub struct EpochData<'a> {
    /// Optimizer input (training set minus the held-back tail)
    pub train: Split<'a>,
    /// Test set
    pub test: Split<'a>,
    /// Held-back tail of the training set; may be empty
    pub heldback: Split<'a>,
}

impl<'a> EpochData<'a> {
    /// Carve the last `holdback` fraction off the training set.
    pub fn from_splits(splits: &'a DataSplits, holdback: f64) -> Result<Self> {
        let (train, heldback) = splits.train.holdback(holdback)?;
        if train.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "holdback fraction {holdback} leaves no training samples"
            )));
        }
        Ok(Self { train, test: splits.test.view(), heldback })
    }
}

/// Pick the masking strategy for a run.
///
/// `keep_fraction` is only read when `enabled`.
pub fn select_strategy(
    enabled: bool,
    shapes: &[(usize, usize)],
    keep_fraction: f64,
    policy: DegeneracyPolicy,
) -> Result<Box<dyn MaskingStrategy>> {
    if enabled {
        Ok(Box::new(OccamStrategy::new(shapes, keep_fraction, policy)?))
    } else {
        Ok(Box::new(DenseStrategy))
    }
}

fn weight_refs<M: Trainable>(model: &M, count: usize) -> Result<Vec<&Array2<f32>>> {
    (0..count)
        .map(|index| {
            model
                .weights(index)
                .ok_or_else(|| Error::InvalidParameter(format!("model has no weight matrix {index}")))
        })
        .collect()
}

/// Runs the control loop over a model.
pub struct OccamTrainer<M: Trainable> {
    model: M,
    strategy: Box<dyn MaskingStrategy>,
    accountant: ParameterAccountant,
    window: LossWindow,
    records: Vec<EpochRecord>,
    callbacks: CallbackManager,
    stage: DriverStage,
}

impl<M: Trainable> OccamTrainer<M> {
    /// Pair `model` with `strategy`.
    ///
    /// The strategy's masks, if any, must match the model's weight shapes.
    pub fn new(model: M, strategy: Box<dyn MaskingStrategy>) -> Result<Self> {
        let shapes = model.weight_shapes();
        if let Some(masks) = strategy.masks() {
            if masks.len() != shapes.len() {
                return Err(Error::InvalidParameter(format!(
                    "strategy holds {} masks, model has {} weight matrices",
                    masks.len(),
                    shapes.len()
                )));
            }
            for (mask, &shape) in masks.iter().zip(&shapes) {
                if mask.shape() != shape {
                    return Err(Error::ShapeMismatch { expected: shape, actual: mask.shape() });
                }
            }
        }
        let accountant = ParameterAccountant::from_shapes(&shapes, model.bias_count());
        Ok(Self {
            model,
            strategy,
            accountant,
            window: LossWindow::new(),
            records: Vec::new(),
            callbacks: CallbackManager::new(),
            stage: DriverStage::Init,
        })
    }

    /// Register an observer.
    pub fn add_callback<C: OccamCallback + 'static>(&mut self, callback: C) {
        self.callbacks.add(callback);
    }

    /// Register an already boxed observer.
    pub fn add_boxed_callback(&mut self, callback: Box<dyn OccamCallback>) {
        self.callbacks.add_boxed(callback);
    }

    /// Current stage.
    pub fn stage(&self) -> DriverStage {
        self.stage
    }

    /// Records so far.
    pub fn records(&self) -> &[EpochRecord] {
        &self.records
    }

    /// Model being trained.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Masking strategy in use.
    pub fn strategy(&self) -> &dyn MaskingStrategy {
        self.strategy.as_ref()
    }

    /// Parameter accountant.
    pub fn accountant(&self) -> &ParameterAccountant {
        &self.accountant
    }

    /// Held-back loss window.
    pub fn window(&self) -> &LossWindow {
        &self.window
    }

    /// Consume the driver, returning the model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Run epoch `epoch` through every stage up to `Account`.
    pub fn run_epoch(&mut self, epoch: usize, data: &EpochData<'_>) -> Result<&EpochRecord> {
        self.stage = DriverStage::TrainEpoch;
        self.model.train_epoch(data.train, self.strategy.constraint())?;
        // Count the masks this epoch trained under, before they are recomputed
        let active = self.strategy.count_active(&self.accountant);

        self.stage = DriverStage::Evaluate;
        let train = self.model.evaluate(data.train)?;
        let test = self.model.evaluate(data.test)?;
        let heldback: Evaluation = if data.heldback.is_empty() {
            train
        } else {
            self.model.evaluate(data.heldback)?
        };
        self.window.push(heldback.loss);

        let mut zeta = None;
        if self.strategy.is_pruning() {
            self.stage = DriverStage::AdaptRate;
            let outcome = self.strategy.adapt_rate(epoch, &self.window)?;
            zeta = outcome.zeta();
            if let RateOutcome::Skipped(event) = &outcome {
                self.callbacks.on_degeneracy(epoch, event);
            }

            self.stage = DriverStage::RecomputeMasks;
            let count = self.strategy.masks().map_or(0, <[_]>::len);
            let weights = weight_refs(&self.model, count)?;
            let skipped = self.strategy.recompute_masks(&weights)?;
            for event in &skipped {
                self.callbacks.on_degeneracy(epoch, event);
            }
        }

        self.stage = DriverStage::Account;
        let record = EpochRecord {
            epoch,
            active,
            upper_bound: self.accountant.upper_bound(),
            train,
            test,
            heldback,
            keep_fraction: self.strategy.keep_fraction(),
            zeta,
        };
        self.callbacks.on_epoch_end(&record);
        self.records.push(record);
        self.records
            .last()
            .ok_or_else(|| Error::InvalidParameter("no epoch recorded".into()))
    }

    /// Run `epochs` epochs and select the best one.
    pub fn run(&mut self, data: &EpochData<'_>, epochs: usize) -> Result<TrainReport> {
        if epochs == 0 {
            return Err(Error::InvalidParameter("epochs must be positive".into()));
        }

        self.callbacks.on_train_begin(&RunContext {
            strategy: self.strategy.name(),
            epochs,
            upper_bound: self.accountant.upper_bound(),
            keep_fraction: self.strategy.keep_fraction(),
            train_samples: data.train.len(),
            heldback_samples: data.heldback.len(),
        });

        let first = self.records.len();
        for epoch in first..first + epochs {
            self.run_epoch(epoch, data)?;
        }

        self.stage = DriverStage::SelectBest;
        let best = select_best(&self.records)
            .cloned()
            .ok_or_else(|| Error::InvalidParameter("no epochs recorded".into()))?;
        let report = TrainReport {
            strategy: self.strategy.name().to_string(),
            upper_bound: self.accountant.upper_bound(),
            best,
            records: self.records.clone(),
        };
        self.callbacks.on_train_end(&report);
        self.stage = DriverStage::Done;
        Ok(report)
    }
}

impl<M: Trainable> fmt::Debug for OccamTrainer<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccamTrainer")
            .field("strategy", &self.strategy.name())
            .field("accountant", &self.accountant)
            .field("stage", &self.stage)
            .field("epochs", &self.records.len())
            .finish_non_exhaustive()
    }
}
