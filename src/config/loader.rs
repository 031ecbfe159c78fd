//! Loading a run specification from YAML

use crate::config::schema::OccamSpec;
use crate::config::validate::validate_config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Parse and validate a YAML specification.
pub fn parse_config(yaml: &str) -> Result<OccamSpec> {
    let spec: OccamSpec = serde_yaml::from_str(yaml)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))?;
    validate_config(&spec)?;
    Ok(spec)
}

/// Read, parse and validate a YAML specification file.
///
/// # Example
///
/// ```no_run
/// use occam::config::load_config;
///
/// let spec = load_config("occam.yaml")?;
/// println!("{} hidden units", spec.model.hidden_units);
/// # Ok::<(), occam::Error>(())
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<OccamSpec> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;
    parse_config(&yaml_content)
}

/// Load `config_path` if given, otherwise start from the defaults.
///
/// The result is not validated when no file is given; callers validate after
/// applying overrides.
pub fn load_or_default(config_path: Option<&Path>) -> Result<OccamSpec> {
    match config_path {
        Some(path) => load_config(path),
        None => Ok(OccamSpec::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;
    use std::io::Write;

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model:\n  hidden_units: 32\ntraining:\n  epochs: 3").unwrap();
        let spec = load_config(file.path()).unwrap();
        assert_eq!(spec.model.hidden_units, 32);
        assert_eq!(spec.training.epochs, 3);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config("/nonexistent/occam.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigError(msg) if msg.contains("Failed to read")));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = parse_config("model: [unclosed").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = parse_config("occam:\n  keep_fraction: 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidKeepFraction(_))
        ));
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(load_or_default(None).unwrap(), OccamSpec::default());
    }
}
