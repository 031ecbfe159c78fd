//! Progress callback printing one line per epoch

use super::traits::{OccamCallback, RunContext};
use crate::error::Degeneracy;
use crate::prune::{EpochRecord, TrainReport};

/// Prints run progress to stdout
#[derive(Clone, Debug, Default)]
pub struct ProgressCallback {
    /// Also print the curvature ratio and degeneracy events
    verbose: bool,
}

impl ProgressCallback {
    /// Create progress callback
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// One-line summary of an epoch
    pub fn format_epoch(record: &EpochRecord, verbose: bool) -> String {
        let keep = record
            .keep_fraction
            .map(|k| format!(", keep: {k:.4}"))
            .unwrap_or_default();
        let zeta = match (verbose, record.zeta) {
            (true, Some(z)) => format!(", zeta: {z:.4}"),
            _ => String::new(),
        };
        format!(
            "Epoch {}: active {}/{} | train loss {:.4} acc {:.4} | test loss {:.4} acc {:.4} | held-back loss {:.4} acc {:.4}{keep}{zeta}",
            record.epoch,
            record.active,
            record.upper_bound,
            record.train.loss,
            record.train.accuracy,
            record.test.loss,
            record.test.accuracy,
            record.heldback.loss,
            record.heldback.accuracy,
        )
    }
}

impl OccamCallback for ProgressCallback {
    fn on_train_begin(&mut self, ctx: &RunContext) {
        println!(
            "Training {} epochs ({} strategy, {} parameters, {} train / {} held-back samples)",
            ctx.epochs, ctx.strategy, ctx.upper_bound, ctx.train_samples, ctx.heldback_samples
        );
    }

    fn on_epoch_end(&mut self, record: &EpochRecord) {
        println!("{}", Self::format_epoch(record, self.verbose));
    }

    fn on_degeneracy(&mut self, epoch: usize, event: &Degeneracy) {
        if self.verbose {
            println!("  epoch {epoch}: skipped ({event})");
        }
    }

    fn on_train_end(&mut self, report: &TrainReport) {
        if self.verbose {
            println!("Finished {} epochs", report.records.len());
        }
    }

    fn name(&self) -> &'static str {
        "ProgressCallback"
    }
}
