//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::{DataSource, OccamSpec};

/// Optimizers the run can build
pub const VALID_OPTIMIZERS: [&str; 2] = ["adam", "sgd"];

/// Validate a run specification
///
/// Checks that numeric values are in range, the optimizer is known and the
/// data source is usable. Runs before any training starts.
pub fn validate_config(spec: &OccamSpec) -> Result<(), ValidationError> {
    if spec.model.hidden_units == 0 {
        return Err(ValidationError::InvalidHiddenUnits(spec.model.hidden_units));
    }

    if !(0.0..1.0).contains(&spec.model.dropout) {
        return Err(ValidationError::InvalidDropout(spec.model.dropout));
    }

    if spec.training.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(spec.training.epochs));
    }

    if spec.data.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(spec.data.batch_size));
    }

    if !(0.0..1.0).contains(&spec.data.holdback) {
        return Err(ValidationError::InvalidHoldback(spec.data.holdback));
    }

    // Only read when masking is on, but a bad value is still a config error
    let keep = spec.occam.keep_fraction;
    if !(keep > 0.0 && keep < 1.0) {
        return Err(ValidationError::InvalidKeepFraction(keep));
    }

    if !(spec.optimizer.lr > 0.0 && spec.optimizer.lr <= 1.0) {
        return Err(ValidationError::InvalidLearningRate(spec.optimizer.lr));
    }

    if !VALID_OPTIMIZERS.contains(&spec.optimizer.name.to_lowercase().as_str()) {
        return Err(ValidationError::InvalidOptimizer(spec.optimizer.name.clone()));
    }

    if !(0.0..1.0).contains(&spec.optimizer.momentum) {
        return Err(ValidationError::InvalidMomentum(spec.optimizer.momentum));
    }

    match &spec.data.source {
        DataSource::Synthetic(cfg) => {
            if cfg.classes < 2 {
                return Err(ValidationError::InvalidSynthetic(format!(
                    "classes ({}) must be >= 2",
                    cfg.classes
                )));
            }
            if cfg.features == 0 || cfg.train_samples == 0 || cfg.test_samples == 0 {
                return Err(ValidationError::InvalidSynthetic(
                    "features and sample counts must be > 0".to_string(),
                ));
            }
            if !(cfg.spread.is_finite() && cfg.spread > 0.0) {
                return Err(ValidationError::InvalidSynthetic(format!(
                    "spread ({}) must be > 0",
                    cfg.spread
                )));
            }
        }
        DataSource::Mnist { dir } => {
            if !dir.is_dir() {
                return Err(ValidationError::MnistDirNotFound(dir.display().to_string()));
            }
        }
    }

    Ok(())
}
