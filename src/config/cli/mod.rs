//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! occam train
//! occam train config.yaml --units 256 --epochs 20 --holdback 0.1
//! occam train --no-occam --records dense.json
//! occam validate config.yaml
//! occam info config.yaml --format yaml
//! ```

mod args;
mod types;

pub use args::{apply_overrides, parse_args, Cli, Command, InfoArgs, TrainArgs, ValidateArgs};
pub use types::OutputFormat;
