//! Builders turning a run specification into data, optimizer and model

use super::schema::{DataSource, OccamSpec, OptimSpec};
use crate::data::{generate, load_mnist, DataSplits};
use crate::error::{Error, Result};
use crate::optim::{Adam, Optimizer, SGD};
use crate::train::{ClassifierConfig, DenseClassifier};

/// Build the optimizer named in `spec`.
///
/// Adam uses β = (0.9, 0.999) and ε = 1e-7.
pub fn build_optimizer(spec: &OptimSpec) -> Result<Box<dyn Optimizer>> {
    match spec.name.to_lowercase().as_str() {
        "adam" => Ok(Box::new(Adam::default_params(spec.lr))),
        "sgd" => Ok(Box::new(SGD::new(spec.lr, spec.momentum))),
        other => Err(Error::ConfigError(format!("Unknown optimizer: {other}"))),
    }
}

/// Load or generate the train/test splits.
pub fn load_data(spec: &OccamSpec) -> Result<DataSplits> {
    match &spec.data.source {
        DataSource::Synthetic(cfg) => generate(cfg, spec.training.seed),
        DataSource::Mnist { dir } => load_mnist(dir),
    }
}

/// Build a classifier sized for `data`.
pub fn build_classifier(spec: &OccamSpec, data: &DataSplits) -> Result<DenseClassifier> {
    let config = ClassifierConfig::new(
        data.train.num_features(),
        spec.model.hidden_units,
        data.train.num_classes(),
    )
    .with_dropout(spec.model.dropout)
    .with_batch_size(spec.data.batch_size)
    .with_seed(spec.training.seed);
    DenseClassifier::new(config, build_optimizer(&spec.optimizer)?)
}
