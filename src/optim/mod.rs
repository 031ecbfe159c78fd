//! Optimizers for training the classifier

mod adam;
mod optimizer;
mod sgd;

pub use adam::Adam;
pub use optimizer::Optimizer;
pub use sgd::SGD;
