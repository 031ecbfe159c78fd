//! Run configuration: YAML schema, validation, CLI parsing and the
//! config-to-report training pipeline

mod builder;
mod cli;
mod loader;
pub mod schema;
mod train;
pub mod validate;

pub use builder::{build_classifier, build_optimizer, load_data};
pub use cli::{
    apply_overrides, parse_args, Cli, Command, InfoArgs, OutputFormat, TrainArgs, ValidateArgs,
};
pub use loader::{load_config, load_or_default, parse_config};
pub use schema::{
    DataSource, DataSpec, ModelSpec, OccamParams, OccamSpec, OptimSpec, OutputSpec, TrainingParams,
};
pub use train::{train_from_spec, train_from_yaml};
pub use validate::{validate_config, ValidationError};
