//! Train command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, load_or_default, train_from_spec, validate_config, TrainArgs};
use crate::report::{render_plots, render_summary};
use crate::train::{OccamCallback, ProgressCallback};

/// Sparkline width in glyphs
const PLOT_WIDTH: usize = 40;

pub fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    let mut spec =
        load_or_default(args.config.as_deref()).map_err(|e| format!("Config error: {e}"))?;

    // Apply command-line overrides, then validate the result
    apply_overrides(&mut spec, &args);
    validate_config(&spec).map_err(|e| format!("Validation failed: {e}"))?;

    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None => "defaults".to_string(),
    };
    log(
        level,
        LogLevel::Normal,
        &format!(
            "Occam: training from {source} ({} units, {} epochs, masking {})",
            spec.model.hidden_units,
            spec.training.epochs,
            if spec.occam.enabled { "on" } else { "off" }
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Keep fraction: {} | holdback: {} | on degenerate: {}",
            spec.occam.keep_fraction,
            spec.effective_holdback(),
            spec.occam.on_degenerate
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Optimizer: {} (lr={}) | batch size: {} | seed: {}",
            spec.optimizer.name, spec.optimizer.lr, spec.data.batch_size, spec.training.seed
        ),
    );

    if args.dry_run {
        log(level, LogLevel::Normal, "Dry run - config validated successfully");
        return Ok(());
    }

    let progress: Option<Box<dyn OccamCallback>> = match level {
        LogLevel::Quiet => None,
        LogLevel::Normal => Some(Box::new(ProgressCallback::new(false))),
        LogLevel::Verbose => Some(Box::new(ProgressCallback::new(true))),
    };
    let report = train_from_spec(&spec, progress).map_err(|e| format!("Training error: {e}"))?;

    log(level, LogLevel::Normal, &render_summary(&report));
    if spec.output.plot {
        log(
            level,
            LogLevel::Normal,
            &render_plots(&report, spec.model.hidden_units, PLOT_WIDTH),
        );
    }
    if let Some(path) = &spec.output.records {
        log(
            level,
            LogLevel::Normal,
            &format!("Records written to {}", path.display()),
        );
    }
    Ok(())
}
