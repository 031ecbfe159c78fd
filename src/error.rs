//! Error types for occam
//!
//! Precondition violations (shape mismatches, bad parameters, invalid
//! configuration) abort before training starts. Numeric degeneracies are kept
//! distinguishable so the driver can apply its [`DegeneracyPolicy`].
//!
//! [`DegeneracyPolicy`]: crate::prune::DegeneracyPolicy

use crate::config::ValidationError;
use thiserror::Error;

/// Numeric degeneracies of the masking control loop
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Degeneracy {
    #[error("no non-zero weights left in matrix {index} to take a quantile over")]
    EmptyMagnitudeSet { index: usize },

    #[error("held-back loss delta {delta:e} is too small to form a curvature ratio")]
    FlatLossDelta { delta: f64 },

    #[error("curvature ratio is not finite ({zeta})")]
    NonFiniteRatio { zeta: f64 },
}

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Numeric degeneracy: {0}")]
    Degenerate(#[from] Degeneracy),

    #[error("Trainer error: {0}")]
    Trainer(Box<dyn std::error::Error + Send + Sync>),

    #[error("Data error: {0}")]
    Data(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Wrap a failure from an external training collaborator.
    pub fn trainer<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Trainer(err.into())
    }

    /// Whether this error is a numeric degeneracy of the control loop.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate(_))
    }
}

/// Result type for occam operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_display() {
        let err = Error::ShapeMismatch { expected: (4, 4), actual: (4, 3) };
        assert_eq!(err.to_string(), "Shape mismatch: expected (4, 4), got (4, 3)");
    }

    #[test]
    fn test_degeneracy_converts() {
        let err: Error = Degeneracy::EmptyMagnitudeSet { index: 1 }.into();
        assert!(err.is_degenerate());
        assert!(err.to_string().contains("matrix 1"));
    }

    #[test]
    fn test_trainer_error_preserves_message() {
        let err = Error::trainer("device lost");
        assert_eq!(err.to_string(), "Trainer error: device lost");
        assert!(!err.is_degenerate());
    }
}
