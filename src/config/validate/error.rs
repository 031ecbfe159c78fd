//! Validation error types

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid hidden units: {0} (must be > 0)")]
    InvalidHiddenUnits(usize),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid keep fraction: {0} (must be in (0.0, 1.0))")]
    InvalidKeepFraction(f64),

    #[error("Invalid holdback fraction: {0} (must be in [0.0, 1.0))")]
    InvalidHoldback(f64),

    #[error("Invalid dropout: {0} (must be in [0.0, 1.0))")]
    InvalidDropout(f32),

    #[error("Invalid learning rate: {0} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate(f32),

    #[error("Invalid momentum: {0} (must be in [0.0, 1.0))")]
    InvalidMomentum(f32),

    #[error("Invalid optimizer: {0} (must be one of: adam, sgd)")]
    InvalidOptimizer(String),

    #[error("Invalid synthetic data: {0}")]
    InvalidSynthetic(String),

    #[error("MNIST directory does not exist: {0}")]
    MnistDirNotFound(String),
}
