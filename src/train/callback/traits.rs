//! Observer hooks for the epoch driver
//!
//! - `RunContext` - static facts about a run, sent once
//! - `OccamCallback` - the trait all observers implement

use crate::error::Degeneracy;
use crate::prune::{EpochRecord, TrainReport};

/// Facts about a run, passed to callbacks before the first epoch
#[derive(Clone, Debug, Default)]
pub struct RunContext {
    /// Strategy name
    pub strategy: &'static str,
    /// Total epochs planned
    pub epochs: usize,
    /// Dense parameter count
    pub upper_bound: usize,
    /// Initial keep-fraction (pruning only)
    pub keep_fraction: Option<f64>,
    /// Samples used for optimizer passes
    pub train_samples: usize,
    /// Samples held back for the rate controller
    pub heldback_samples: usize,
}

/// Trait for run observers
///
/// All methods have default no-op implementations. Callbacks observe only;
/// they cannot alter the run.
pub trait OccamCallback: Send {
    /// Called before the first epoch
    fn on_train_begin(&mut self, _ctx: &RunContext) {}

    /// Called once an epoch has been accounted
    fn on_epoch_end(&mut self, _record: &EpochRecord) {}

    /// Called when a degeneracy was skipped during `epoch`
    fn on_degeneracy(&mut self, _epoch: usize, _event: &Degeneracy) {}

    /// Called after the best epoch has been selected
    fn on_train_end(&mut self, _report: &TrainReport) {}

    /// Get callback name for logging
    fn name(&self) -> &'static str {
        "OccamCallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::Evaluation;

    #[test]
    fn test_run_context_default() {
        let ctx = RunContext::default();
        assert_eq!(ctx.epochs, 0);
        assert!(ctx.keep_fraction.is_none());
    }

    #[test]
    fn test_default_callback_impl() {
        struct MinimalCallback;
        impl OccamCallback for MinimalCallback {}

        let mut cb = MinimalCallback;
        let record = EpochRecord {
            epoch: 0,
            active: 1,
            upper_bound: 1,
            train: Evaluation::default(),
            test: Evaluation::default(),
            heldback: Evaluation::default(),
            keep_fraction: None,
            zeta: None,
        };
        cb.on_train_begin(&RunContext::default());
        cb.on_epoch_end(&record);
        cb.on_degeneracy(2, &Degeneracy::FlatLossDelta { delta: 0.0 });
        assert_eq!(cb.name(), "OccamCallback");
    }
}
