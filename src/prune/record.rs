//! Per-epoch records and best-epoch selection

use crate::train::Evaluation;
use serde::{Deserialize, Serialize};

/// Everything observed about one epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochRecord {
    /// Epoch index (0-based).
    pub epoch: usize,
    /// Weights under a 1 mask entry while this epoch trained, plus the fixed
    /// overhead.
    pub active: usize,
    /// Dense parameter count.
    pub upper_bound: usize,
    /// Evaluation on the training part.
    pub train: Evaluation,
    /// Evaluation on the test set.
    pub test: Evaluation,
    /// Evaluation on the held-back part.
    pub heldback: Evaluation,
    /// Keep-fraction after this epoch's rate update.
    pub keep_fraction: Option<f64>,
    /// Curvature ratio, when one was computed.
    pub zeta: Option<f64>,
}

impl EpochRecord {
    /// `active / upper_bound`
    pub fn fraction(&self) -> f64 {
        if self.upper_bound == 0 {
            1.0
        } else {
            self.active as f64 / self.upper_bound as f64
        }
    }
}

/// Record with the lowest test loss; the earliest wins ties.
pub fn select_best(records: &[EpochRecord]) -> Option<&EpochRecord> {
    records.iter().reduce(|best, r| {
        if r.test.loss.total_cmp(&best.test.loss).is_lt() {
            r
        } else {
            best
        }
    })
}

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainReport {
    /// Strategy that produced the run.
    pub strategy: String,
    /// Dense parameter count.
    pub upper_bound: usize,
    /// Epoch with the lowest test loss.
    pub best: EpochRecord,
    /// Every epoch in order.
    pub records: Vec<EpochRecord>,
}

impl TrainReport {
    /// Active fraction of the best epoch.
    pub fn best_fraction(&self) -> f64 {
        self.best.fraction()
    }

    /// Active count of the best epoch.
    pub fn best_active(&self) -> usize {
        self.best.active
    }
}
