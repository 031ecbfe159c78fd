//! Single-command training from a run specification

use super::builder::{build_classifier, load_data};
use super::loader::load_config;
use super::schema::OccamSpec;
use super::validate::validate_config;
use crate::error::Result;
use crate::prune::{select_strategy, EpochData, OccamTrainer, TrainReport};
use crate::report::write_records;
use crate::train::{OccamCallback, Trainable};
use std::path::Path;

/// Run a validated specification end to end.
///
/// Steps:
/// 1. Load or generate the data and carve off the held-back tail
/// 2. Build the classifier and its optimizer
/// 3. Pick the masking strategy
/// 4. Run the epoch driver
/// 5. Write the records when `output.records` is set
pub fn train_from_spec(spec: &OccamSpec, progress: Option<Box<dyn OccamCallback>>) -> Result<TrainReport> {
    validate_config(spec)?;

    let data = load_data(spec)?;
    let epoch_data = EpochData::from_splits(&data, spec.effective_holdback())?;
    let model = build_classifier(spec, &data)?;
    let strategy = select_strategy(
        spec.occam.enabled,
        &model.weight_shapes(),
        spec.occam.keep_fraction,
        spec.occam.on_degenerate,
    )?;

    let mut trainer = OccamTrainer::new(model, strategy)?;
    if let Some(callback) = progress {
        trainer.add_boxed_callback(callback);
    }
    let report = trainer.run(&epoch_data, spec.training.epochs)?;

    if let Some(path) = &spec.output.records {
        write_records(path, &report)?;
    }
    Ok(report)
}

/// Train from a YAML configuration file without progress output.
///
/// # Example
///
/// ```no_run
/// use occam::config::train_from_yaml;
///
/// let report = train_from_yaml("occam.yaml")?;
/// println!("best epoch {}", report.best.epoch);
/// # Ok::<(), occam::Error>(())
/// ```
pub fn train_from_yaml<P: AsRef<Path>>(config_path: P) -> Result<TrainReport> {
    let spec = load_config(config_path)?;
    train_from_spec(&spec, None)
}
