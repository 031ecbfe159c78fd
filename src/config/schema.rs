//! YAML schema for an occam run
//!
//! Every section is optional; a missing section takes its defaults, which
//! reproduce the reference setup (1024 hidden units, 12 epochs, keep-fraction
//! 0.4, no held-back split).

use crate::data::SyntheticConfig;
use crate::prune::DegeneracyPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete run specification
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OccamSpec {
    /// Classifier architecture
    #[serde(default)]
    pub model: ModelSpec,

    /// Data source and splitting
    #[serde(default)]
    pub data: DataSpec,

    /// Optimizer configuration
    #[serde(default)]
    pub optimizer: OptimSpec,

    /// Epochs and seed
    #[serde(default)]
    pub training: TrainingParams,

    /// Adaptive masking
    #[serde(default)]
    pub occam: OccamParams,

    /// Reporting
    #[serde(default)]
    pub output: OutputSpec,
}

impl OccamSpec {
    /// Held-back fraction actually used: forced to 0 when masking is off.
    pub fn effective_holdback(&self) -> f64 {
        if self.occam.enabled {
            self.data.holdback
        } else {
            0.0
        }
    }
}

/// Classifier architecture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSpec {
    /// Hidden units
    pub hidden_units: usize,
    /// Dropout after the hidden layer
    pub dropout: f32,
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self { hidden_units: 1024, dropout: 0.2 }
    }
}

/// Where samples come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DataSource {
    /// Seeded Gaussian clusters
    Synthetic(SyntheticConfig),
    /// MNIST IDX files in a directory
    Mnist {
        /// Directory holding the four IDX files
        dir: PathBuf,
    },
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Synthetic(SyntheticConfig::default())
    }
}

/// Data configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSpec {
    /// Data source
    pub source: DataSource,
    /// Fraction of the training set held back for the rate controller
    pub holdback: f64,
    /// Mini-batch size
    pub batch_size: usize,
}

impl Default for DataSpec {
    fn default() -> Self {
        Self { source: DataSource::default(), holdback: 0.0, batch_size: 32 }
    }
}

/// Optimizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimSpec {
    /// Optimizer name (adam, sgd)
    pub name: String,
    /// Learning rate
    pub lr: f32,
    /// Momentum (sgd only)
    pub momentum: f32,
}

impl Default for OptimSpec {
    fn default() -> Self {
        Self { name: "adam".to_string(), lr: 1e-3, momentum: 0.0 }
    }
}

/// Training hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    /// Number of epochs
    pub epochs: usize,
    /// Seed for data generation, initialization and shuffling
    pub seed: u64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self { epochs: 12, seed: 42 }
    }
}

/// Adaptive masking parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OccamParams {
    /// Recompute masks between epochs
    pub enabled: bool,
    /// Initial (and maximum) keep-fraction
    pub keep_fraction: f64,
    /// What to do on a numeric degeneracy
    pub on_degenerate: DegeneracyPolicy,
}

impl Default for OccamParams {
    fn default() -> Self {
        Self { enabled: true, keep_fraction: 0.4, on_degenerate: DegeneracyPolicy::Skip }
    }
}

/// Reporting options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSpec {
    /// Render loss and accuracy sparklines after the run
    pub plot: bool,
    /// Write the epoch records as JSON here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<PathBuf>,
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self { plot: true, records: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let spec: OccamSpec = serde_yaml::from_str("{}").unwrap();
        assert_eq!(spec, OccamSpec::default());
        assert_eq!(spec.model.hidden_units, 1024);
        assert_eq!(spec.training.epochs, 12);
        assert!(spec.occam.enabled);
        assert_eq!(spec.occam.keep_fraction, 0.4);
        assert!(spec.output.plot);
    }

    #[test]
    fn test_partial_sections() {
        let yaml = r"
model:
  hidden_units: 64
occam:
  keep_fraction: 0.3
  on_degenerate: fail
data:
  holdback: 0.1
  source:
    kind: synthetic
    classes: 4
";
        let spec: OccamSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.model.hidden_units, 64);
        assert_eq!(spec.model.dropout, 0.2);
        assert_eq!(spec.occam.on_degenerate, DegeneracyPolicy::Fail);
        assert_eq!(spec.data.batch_size, 32);
        match spec.data.source {
            DataSource::Synthetic(cfg) => {
                assert_eq!(cfg.classes, 4);
                assert_eq!(cfg.features, 64);
            }
            DataSource::Mnist { .. } => panic!("Expected synthetic source"),
        }
    }

    #[test]
    fn test_mnist_source() {
        let yaml = "data:\n  source:\n    kind: mnist\n    dir: /data/mnist\n";
        let spec: OccamSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.data.source, DataSource::Mnist { dir: PathBuf::from("/data/mnist") });
    }

    #[test]
    fn test_effective_holdback() {
        let mut spec = OccamSpec::default();
        spec.data.holdback = 0.2;
        assert_eq!(spec.effective_holdback(), 0.2);
        spec.occam.enabled = false;
        assert_eq!(spec.effective_holdback(), 0.0);
    }

    #[test]
    fn test_yaml_roundtrip_preserves_spec() {
        let mut spec = OccamSpec::default();
        spec.output.records = Some(PathBuf::from("records.json"));
        let yaml = serde_yaml::to_string(&spec).unwrap();
        let back: OccamSpec = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, spec);
    }
}
