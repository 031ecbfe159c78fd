//! Info command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_or_default, InfoArgs, OutputFormat};

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_or_default(args.config.as_deref()).map_err(|e| format!("Config error: {e}"))?;

    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Configuration Info:");
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "Model: {} hidden units (dropout {})",
                    spec.model.hidden_units, spec.model.dropout
                ),
            );
            log(
                level,
                LogLevel::Normal,
                &format!("Optimizer: {} (lr={})", spec.optimizer.name, spec.optimizer.lr),
            );
            log(level, LogLevel::Normal, &format!("Epochs: {}", spec.training.epochs));
            log(level, LogLevel::Normal, &format!("Batch size: {}", spec.data.batch_size));
            if spec.occam.enabled {
                log(
                    level,
                    LogLevel::Normal,
                    &format!(
                        "Masking: keep fraction {}, holdback {}",
                        spec.occam.keep_fraction,
                        spec.effective_holdback()
                    ),
                );
            } else {
                log(level, LogLevel::Normal, "Masking: off");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&spec)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&spec)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}
