//! Masking strategies selected once per run.
//!
//! [`DenseStrategy`] trains the full network and never touches the selector or
//! the controller. [`OccamStrategy`] owns the masks, adapts the keep-fraction
//! and recomputes the masks between epochs.

use crate::error::{Degeneracy, Error, Result};
use crate::prune::accountant::ParameterAccountant;
use crate::prune::mask::{Mask, MaskStore, Unconstrained, WeightConstraint};
use crate::prune::rate::{LossWindow, RateController, RateUpdate};
use crate::prune::threshold::compute_mask;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First epoch index at which the keep-fraction may change.
pub const FIRST_ADAPTIVE_EPOCH: usize = 2;

/// What to do when the control loop hits a numeric degeneracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneracyPolicy {
    /// Keep the previous keep-fraction or mask and carry on.
    #[default]
    Skip,
    /// Abort the run.
    Fail,
}

impl fmt::Display for DegeneracyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for DegeneracyPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => Err(format!("unknown degeneracy policy '{other}' (expected skip or fail)")),
        }
    }
}

/// Result of the rate adaptation stage for one epoch.
#[derive(Debug, Clone, PartialEq)]
pub enum RateOutcome {
    /// Pruning disabled or too early in the run.
    Inactive,
    /// Keep-fraction updated.
    Adapted(RateUpdate),
    /// Degenerate curvature ratio; keep-fraction left unchanged.
    Skipped(Degeneracy),
}

impl RateOutcome {
    /// Curvature ratio, when one was computed.
    pub fn zeta(&self) -> Option<f64> {
        match self {
            Self::Adapted(update) => Some(update.zeta),
            _ => None,
        }
    }
}

/// Capability set the epoch driver needs from a masking strategy.
pub trait MaskingStrategy {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Whether masks are recomputed between epochs.
    fn is_pruning(&self) -> bool;

    /// Constraint the model applies after each optimizer step.
    fn constraint(&self) -> &dyn WeightConstraint;

    /// Current keep-fraction, if the strategy has one.
    fn keep_fraction(&self) -> Option<f64>;

    /// Adapt the keep-fraction at epoch index `epoch`.
    fn adapt_rate(&mut self, epoch: usize, window: &LossWindow) -> Result<RateOutcome>;

    /// Recompute every mask from the current weights.
    ///
    /// Returns the degeneracies that were skipped under [`DegeneracyPolicy::Skip`].
    fn recompute_masks(&mut self, weights: &[&Array2<f32>]) -> Result<Vec<Degeneracy>>;

    /// Current masks, if any.
    fn masks(&self) -> Option<&[Mask]>;

    /// Active parameter count under the current masks.
    fn count_active(&self, accountant: &ParameterAccountant) -> usize {
        match self.masks() {
            Some(masks) => accountant.count_active(masks),
            None => accountant.upper_bound(),
        }
    }
}

/// Dense training: no masks, no rate control.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenseStrategy;

impl MaskingStrategy for DenseStrategy {
    fn name(&self) -> &'static str {
        "dense"
    }

    fn is_pruning(&self) -> bool {
        false
    }

    fn constraint(&self) -> &dyn WeightConstraint {
        &Unconstrained
    }

    fn keep_fraction(&self) -> Option<f64> {
        None
    }

    fn adapt_rate(&mut self, _epoch: usize, _window: &LossWindow) -> Result<RateOutcome> {
        Ok(RateOutcome::Inactive)
    }

    fn recompute_masks(&mut self, _weights: &[&Array2<f32>]) -> Result<Vec<Degeneracy>> {
        Ok(Vec::new())
    }

    fn masks(&self) -> Option<&[Mask]> {
        None
    }
}

/// Adaptive magnitude masking driven by the held-back loss curve.
#[derive(Debug, Clone)]
pub struct OccamStrategy {
    store: MaskStore,
    controller: RateController,
    policy: DegeneracyPolicy,
}

impl OccamStrategy {
    /// All-ones masks for `shapes`, keep-fraction starting at `keep_fraction`.
    pub fn new(
        shapes: &[(usize, usize)],
        keep_fraction: f64,
        policy: DegeneracyPolicy,
    ) -> Result<Self> {
        Ok(Self {
            store: MaskStore::initialize(shapes),
            controller: RateController::new(keep_fraction)?,
            policy,
        })
    }

    /// Mask store.
    pub fn store(&self) -> &MaskStore {
        &self.store
    }

    /// Rate controller.
    pub fn controller(&self) -> &RateController {
        &self.controller
    }

    /// Degeneracy policy.
    pub fn policy(&self) -> DegeneracyPolicy {
        self.policy
    }

    fn tolerate(&self, err: Error) -> Result<Degeneracy> {
        match (self.policy, err) {
            (DegeneracyPolicy::Skip, Error::Degenerate(kind)) => Ok(kind),
            (_, err) => Err(err),
        }
    }
}

impl MaskingStrategy for OccamStrategy {
    fn name(&self) -> &'static str {
        "occam"
    }

    fn is_pruning(&self) -> bool {
        true
    }

    fn constraint(&self) -> &dyn WeightConstraint {
        &self.store
    }

    fn keep_fraction(&self) -> Option<f64> {
        Some(self.controller.rate())
    }

    fn adapt_rate(&mut self, epoch: usize, window: &LossWindow) -> Result<RateOutcome> {
        if epoch < FIRST_ADAPTIVE_EPOCH {
            return Ok(RateOutcome::Inactive);
        }
        match self.controller.update(window) {
            Ok(update) => Ok(RateOutcome::Adapted(update)),
            Err(err) => self.tolerate(err).map(RateOutcome::Skipped),
        }
    }

    fn recompute_masks(&mut self, weights: &[&Array2<f32>]) -> Result<Vec<Degeneracy>> {
        if weights.len() != self.store.len() {
            return Err(Error::InvalidParameter(format!(
                "expected {} weight matrices, got {}",
                self.store.len(),
                weights.len()
            )));
        }

        // Compute everything first so a failure leaves all masks untouched
        let keep_fraction = self.controller.rate();
        let mut fresh = Vec::with_capacity(weights.len());
        let mut skipped = Vec::new();
        for (index, w) in weights.iter().enumerate() {
            match compute_mask(w, keep_fraction, index) {
                Ok(mask) => fresh.push((index, mask)),
                Err(err) => skipped.push(self.tolerate(err)?),
            }
        }
        for (index, mask) in fresh {
            self.store.replace(index, mask)?;
        }
        Ok(skipped)
    }

    fn masks(&self) -> Option<&[Mask]> {
        Some(self.store.masks())
    }
}
