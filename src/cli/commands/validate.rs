//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, DataSource, OccamSpec, ValidateArgs};

/// Format model information as a string
pub fn format_model_info(spec: &OccamSpec) -> String {
    format!(
        "  Hidden units: {}\n  Dropout: {}",
        spec.model.hidden_units, spec.model.dropout
    )
}

/// Format data configuration as a string
pub fn format_data_info(spec: &OccamSpec) -> String {
    let source = match &spec.data.source {
        DataSource::Synthetic(cfg) => format!(
            "synthetic ({} classes, {} features, {}/{} samples)",
            cfg.classes, cfg.features, cfg.train_samples, cfg.test_samples
        ),
        DataSource::Mnist { dir } => format!("mnist ({})", dir.display()),
    };
    let mut lines = vec![format!("  Data: {source}")];
    lines.push(format!("  Batch size: {}", spec.data.batch_size));
    if spec.effective_holdback() > 0.0 {
        lines.push(format!("  Holdback: {}", spec.effective_holdback()));
    }
    lines.join("\n")
}

/// Format optimizer configuration as a string
pub fn format_optimizer_info(spec: &OccamSpec) -> String {
    let mut lines = vec![
        format!("  Optimizer: {}", spec.optimizer.name),
        format!("  Learning rate: {}", spec.optimizer.lr),
    ];
    if spec.optimizer.momentum > 0.0 {
        lines.push(format!("  Momentum: {}", spec.optimizer.momentum));
    }
    lines.join("\n")
}

/// Format masking configuration as a string
pub fn format_occam_info(spec: &OccamSpec) -> String {
    if !spec.occam.enabled {
        return "  Masking: off".to_string();
    }
    format!(
        "  Masking: on\n    Keep fraction: {}\n    On degenerate: {}",
        spec.occam.keep_fraction, spec.occam.on_degenerate
    )
}

/// Print detailed configuration summary
pub fn print_detailed_summary(spec: &OccamSpec) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_model_info(spec));
    println!();
    println!("{}", format_data_info(spec));
    println!();
    println!("{}", format_optimizer_info(spec));
    println!();
    println!("  Epochs: {}", spec.training.epochs);
    println!("{}", format_occam_info(spec));
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    // load_config validates as part of loading
    let spec = load_config(&args.config).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed && level != LogLevel::Quiet {
        print_detailed_summary(&spec);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_model_info() {
        let info = format_model_info(&OccamSpec::default());
        assert!(info.contains("1024"));
        assert!(info.contains("0.2"));
    }

    #[test]
    fn test_format_data_info() {
        let mut spec = OccamSpec::default();
        let info = format_data_info(&spec);
        assert!(info.contains("synthetic"));
        assert!(!info.contains("Holdback"));

        spec.data.holdback = 0.1;
        spec.data.source = DataSource::Mnist { dir: PathBuf::from("/data/mnist") };
        let info = format_data_info(&spec);
        assert!(info.contains("/data/mnist"));
        assert!(info.contains("Holdback: 0.1"));
    }

    #[test]
    fn test_format_optimizer_info() {
        let mut spec = OccamSpec::default();
        assert!(!format_optimizer_info(&spec).contains("Momentum"));
        spec.optimizer.momentum = 0.9;
        assert!(format_optimizer_info(&spec).contains("Momentum: 0.9"));
    }

    #[test]
    fn test_format_occam_info() {
        let mut spec = OccamSpec::default();
        assert!(format_occam_info(&spec).contains("Keep fraction: 0.4"));
        spec.occam.enabled = false;
        assert_eq!(format_occam_info(&spec), "  Masking: off");
    }
}
