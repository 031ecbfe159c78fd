//! Training data: MNIST IDX files or seeded synthetic clusters.

mod dataset;
pub mod idx;
pub mod synthetic;

pub use dataset::{DataSplits, Dataset, Split};
pub use idx::load_mnist;
pub use synthetic::{generate, SyntheticConfig};
