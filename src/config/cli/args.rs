//! Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::config::schema::{DataSource, OccamSpec};

/// Occam: adaptive magnitude masking for dense classifiers
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "occam")]
#[command(version)]
#[command(about = "Train a dense classifier while discovering a minimal subnetwork")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Train with adaptive masking (or densely with --no-occam)
    Train(TrainArgs),

    /// Validate a configuration file without training
    Validate(ValidateArgs),

    /// Display the resolved configuration
    Info(InfoArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq, Default)]
pub struct TrainArgs {
    /// Path to YAML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Override hidden units
    #[arg(short, long)]
    pub units: Option<usize>,

    /// Override number of epochs
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Train densely without masking
    #[arg(long)]
    pub no_occam: bool,

    /// Override the initial keep-fraction
    #[arg(short, long)]
    pub keep_fraction: Option<f64>,

    /// Override the held-back fraction of the training set
    #[arg(long)]
    pub holdback: Option<f64>,

    /// Override batch size
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Override learning rate
    #[arg(short, long)]
    pub lr: Option<f32>,

    /// Load MNIST IDX files from this directory
    #[arg(long, value_name = "DIR")]
    pub mnist: Option<PathBuf>,

    /// Render sparklines after the run
    #[arg(long, overrides_with = "no_plot")]
    pub plot: bool,

    /// Skip the sparklines
    #[arg(long, overrides_with = "plot")]
    pub no_plot: bool,

    /// Write epoch records as JSON to this path
    #[arg(long, value_name = "JSON")]
    pub records: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dry run (validate config but don't train)
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show the resolved settings after validating
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to an OccamSpec
pub fn apply_overrides(spec: &mut OccamSpec, args: &TrainArgs) {
    if let Some(units) = args.units {
        spec.model.hidden_units = units;
    }
    if let Some(epochs) = args.epochs {
        spec.training.epochs = epochs;
    }
    if args.no_occam {
        spec.occam.enabled = false;
    }
    if let Some(keep) = args.keep_fraction {
        spec.occam.keep_fraction = keep;
    }
    if let Some(holdback) = args.holdback {
        spec.data.holdback = holdback;
    }
    if let Some(batch_size) = args.batch_size {
        spec.data.batch_size = batch_size;
    }
    if let Some(lr) = args.lr {
        spec.optimizer.lr = lr;
    }
    if let Some(dir) = &args.mnist {
        spec.data.source = DataSource::Mnist { dir: dir.clone() };
    }
    if args.plot {
        spec.output.plot = true;
    }
    if args.no_plot {
        spec.output.plot = false;
    }
    if let Some(records) = &args.records {
        spec.output.records = Some(records.clone());
    }
    if let Some(seed) = args.seed {
        spec.training.seed = seed;
    }
}
