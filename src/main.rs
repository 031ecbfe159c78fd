//! Occam CLI
//!
//! Train a dense classifier with adaptive magnitude masking.
//!
//! # Usage
//!
//! ```bash
//! # Train with the default setup (synthetic data, 1024 units, 12 epochs)
//! occam train
//!
//! # Train from config with overrides
//! occam train config.yaml --units 256 --holdback 0.1 --records run.json
//!
//! # Dense baseline
//! occam train config.yaml --no-occam
//!
//! # Validate config
//! occam validate config.yaml
//!
//! # Show config info
//! occam info config.yaml --format yaml
//! ```

use clap::Parser;
use occam::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
