//! Callback system for run events
//!
//! Provides hooks the epoch driver fires:
//! - `on_train_begin` / `on_train_end`
//! - `on_epoch_end`
//! - `on_degeneracy`
//!
//! # Example
//!
//! ```rust
//! use occam::prune::EpochRecord;
//! use occam::train::callback::OccamCallback;
//!
//! struct PrintCallback;
//!
//! impl OccamCallback for PrintCallback {
//!     fn on_epoch_end(&mut self, record: &EpochRecord) {
//!         println!("Epoch {} kept {} weights", record.epoch, record.active);
//!     }
//! }
//! ```

mod manager;
mod progress;
mod traits;

pub use manager::CallbackManager;
pub use progress::ProgressCallback;
pub use traits::{OccamCallback, RunContext};
