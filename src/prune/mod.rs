//! Adaptive magnitude masking
//!
//! The control loop that trains a dense model while discovering a small
//! subnetwork:
//!
//! - **Mask store**: one binary mask per weight matrix, applied after every
//!   optimizer step
//! - **Threshold selector**: magnitude quantile of the non-zero weights
//! - **Rate controller**: keep-fraction adapted from the curvature of the
//!   held-back loss curve
//! - **Parameter accountant**: active count against the dense upper bound
//! - **Epoch driver**: sequences the stages and selects the best epoch
//!
//! # Example
//!
//! ```ignore
//! use occam::prune::{select_strategy, DegeneracyPolicy, EpochData, OccamTrainer};
//!
//! let strategy = select_strategy(true, &model.weight_shapes(), 0.4, DegeneracyPolicy::Skip)?;
//! let mut trainer = OccamTrainer::new(model, strategy)?;
//! let report = trainer.run(&EpochData::from_splits(&splits, 0.1)?, 12)?;
//! println!("best epoch {} keeps {:.1}%", report.best.epoch, 100.0 * report.best_fraction());
//! ```

mod accountant;
mod driver;
mod mask;
mod rate;
mod record;
mod strategy;
mod threshold;

pub use accountant::{count_active, upper_bound, ParameterAccountant};
pub use driver::{select_strategy, DriverStage, EpochData, OccamTrainer};
pub use mask::{Mask, MaskStore, Unconstrained, WeightConstraint};
pub use rate::{adapt_rate, LossWindow, RateController, RateUpdate, RATE_FLOOR_RATIO, WINDOW_LEN};
pub use record::{select_best, EpochRecord, TrainReport};
pub use strategy::{
    DegeneracyPolicy, DenseStrategy, MaskingStrategy, OccamStrategy, RateOutcome,
    FIRST_ADAPTIVE_EPOCH,
};
pub use threshold::{check_keep_fraction, compute_mask, magnitude_threshold, quantile};
