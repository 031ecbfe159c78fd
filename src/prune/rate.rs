//! Keep-fraction feedback from the held-back loss curve.
//!
//! The controller watches the last three held-back losses and forms the ratio
//! of consecutive improvements
//!
//! ```text
//! zeta = (L[t] - L[t-1]) / (L[t-1] - L[t-2])
//! ```
//!
//! and scales the keep-fraction by it, clipped to `[0.1 * base, base]`.
//! Accelerating improvement raises the fraction of weights dropped next
//! epoch; stalling or reversing improvement lowers it.

use crate::error::{Degeneracy, Error, Result};
use crate::prune::threshold::check_keep_fraction;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Floor of the keep-fraction, relative to its initial value.
pub const RATE_FLOOR_RATIO: f64 = 0.1;

/// Number of held-back losses the controller needs.
pub const WINDOW_LEN: usize = 3;

/// The three most recent held-back losses, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LossWindow {
    losses: VecDeque<f64>,
}

impl LossWindow {
    /// Create an empty window.
    pub fn new() -> Self {
        Self { losses: VecDeque::with_capacity(WINDOW_LEN) }
    }

    /// Build a window from a loss history, keeping the last three values.
    pub fn from_history(history: &[f64]) -> Self {
        let mut window = Self::new();
        for &loss in history {
            window.push(loss);
        }
        window
    }

    /// Append a loss, evicting the oldest once three are held.
    pub fn push(&mut self, loss: f64) {
        if self.losses.len() == WINDOW_LEN {
            self.losses.pop_front();
        }
        self.losses.push_back(loss);
    }

    /// Number of losses held (at most three).
    pub fn len(&self) -> usize {
        self.losses.len()
    }

    /// Whether no loss has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    /// Whether the window holds enough losses for a curvature ratio.
    pub fn is_full(&self) -> bool {
        self.losses.len() == WINDOW_LEN
    }

    /// Losses oldest first.
    pub fn losses(&self) -> Vec<f64> {
        self.losses.iter().copied().collect()
    }

    /// Ratio of the latest loss delta to the one before it.
    pub fn curvature_ratio(&self) -> Result<f64> {
        if !self.is_full() {
            return Err(Error::InvalidParameter(format!(
                "curvature ratio needs {WINDOW_LEN} held-back losses, window holds {}",
                self.losses.len()
            )));
        }
        let (l0, l1, l2) = (self.losses[0], self.losses[1], self.losses[2]);
        let prior = l1 - l0;
        if prior.abs() <= f64::EPSILON {
            return Err(Degeneracy::FlatLossDelta { delta: prior }.into());
        }
        let zeta = (l2 - l1) / prior;
        if !zeta.is_finite() {
            return Err(Degeneracy::NonFiniteRatio { zeta }.into());
        }
        Ok(zeta)
    }
}

/// Next keep-fraction for `current_rate` given the held-back loss `window`.
pub fn adapt_rate(window: &LossWindow, current_rate: f64, base_rate: f64) -> Result<f64> {
    let zeta = window.curvature_ratio()?;
    Ok((zeta * current_rate).clamp(RATE_FLOOR_RATIO * base_rate, base_rate))
}

/// Outcome of one controller update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateUpdate {
    /// Curvature ratio that drove the update.
    pub zeta: f64,
    /// Keep-fraction before the update.
    pub previous: f64,
    /// Keep-fraction after clipping.
    pub rate: f64,
}

/// Adapts the keep-fraction between `0.1 * base` and `base`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateController {
    base_rate: f64,
    rate: f64,
}

impl RateController {
    /// Create a controller starting at `base_rate`, which must lie in (0, 1).
    pub fn new(base_rate: f64) -> Result<Self> {
        check_keep_fraction(base_rate)?;
        Ok(Self { base_rate, rate: base_rate })
    }

    /// Current keep-fraction.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Compute the next keep-fraction from `window` without committing it.
    pub fn propose(&self, window: &LossWindow) -> Result<RateUpdate> {
        let zeta = window.curvature_ratio()?;
        Ok(RateUpdate {
            zeta,
            previous: self.rate,
            rate: adapt_rate(window, self.rate, self.base_rate)?,
        })
    }

    /// Compute and commit the next keep-fraction.
    ///
    /// On error the current rate is left unchanged.
    pub fn update(&mut self, window: &LossWindow) -> Result<RateUpdate> {
        let update = self.propose(window)?;
        self.rate = update.rate;
        Ok(update)
    }
}
