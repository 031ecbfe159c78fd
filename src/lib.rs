//! Occam gradient descent
//!
//! Trains a two-layer dense classifier while adaptively masking its weights
//! by magnitude. After each epoch the keep-fraction is adjusted from the
//! curvature of the recent loss curve, the masks are recomputed from the
//! current weight magnitudes, and the active parameter count is recorded.
//! The epoch with the lowest test loss is reported as the result.
//!
//! # Example
//!
//! ```no_run
//! use occam::config::{train_from_spec, OccamSpec};
//!
//! let mut spec = OccamSpec::default();
//! spec.model.hidden_units = 128;
//! spec.data.holdback = 0.1;
//!
//! let report = train_from_spec(&spec, None)?;
//! println!("best epoch: {}", report.best.epoch);
//! # Ok::<(), occam::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod optim;
pub mod prune;
pub mod report;
pub mod train;

pub use error::{Error, Result};
