//! Model side of the control loop
//!
//! - [`Trainable`]: the seam the epoch driver trains and evaluates through
//! - [`DenseClassifier`]: the two-layer classifier being masked
//! - Softmax cross-entropy and run callbacks

pub mod callback;
mod loss;
mod model;
mod trainable;

pub use callback::{CallbackManager, OccamCallback, ProgressCallback, RunContext};
pub use loss::{argmax_rows, cross_entropy_grad, cross_entropy_sum, softmax_rows};
pub use model::{ClassifierConfig, DenseClassifier, HIDDEN, OUTPUT};
pub use trainable::{Evaluation, Trainable};
