//! Configuration management and validation.
//!
//! Provides the processing and output settings for the MPCORB processor,
//! loaded in layers: built-in defaults, then a TOML config file, then
//! environment variables, then command-line flags.

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::app::services::mpcorb_parser::ParserOptions;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BATCH_SIZE, DEFAULT_MAX_RECORDED_ERRORS,
    MAX_PARALLEL_WORKERS, env_vars,
};
use crate::{Error, Result};

/// Output format options for decoded records and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON lines for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub output: OutputConfig,
}

/// Decoding behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of batches decoded concurrently
    pub workers: usize,

    /// Candidate lines per batch
    pub batch_size: usize,

    /// Abort on the first record that fails to decode
    pub strict: bool,

    /// Decode failure messages kept for reporting
    pub max_recorded_errors: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            batch_size: DEFAULT_BATCH_SIZE,
            strict: false,
            max_recorded_errors: DEFAULT_MAX_RECORDED_ERRORS,
        }
    }
}

/// Output behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            show_progress: true,
        }
    }
}

impl Config {
    /// Default config file location (`<config dir>/mpcorb-processor/config.toml`)
    pub fn default_config_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine user config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config from {}", path.display()), e)
        })?;

        toml::from_str(&contents).map_err(|e| {
            Error::config_parsing(format!("Failed to parse config file {}", path.display()), e)
        })
    }

    /// Load configuration: defaults, then file, then environment
    ///
    /// An explicit `config_file` must exist. Without one, the default config
    /// path is used only if a file is present there.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                info!("Using config file: {}", path.display());
                Self::load_from_file(path)?
            }
            None => match Self::default_config_path() {
                Ok(path) if path.exists() => {
                    info!("Using config file: {}", path.display());
                    Self::load_from_file(&path)?
                }
                Ok(_) => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
                Err(e) => {
                    debug!("Skipping default config file: {:#}", e);
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply `MPCORB_*` overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(env_vars::WORKERS) {
            self.processing.workers = parse_env(env_vars::WORKERS, &value)?;
        }
        if let Some(value) = lookup(env_vars::BATCH_SIZE) {
            self.processing.batch_size = parse_env(env_vars::BATCH_SIZE, &value)?;
        }
        if let Some(value) = lookup(env_vars::STRICT) {
            self.processing.strict = parse_env(env_vars::STRICT, &value)?;
        }
        Ok(())
    }

    /// Validate settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.processing.workers == 0 {
            return Err(Error::configuration(
                "Number of workers must be greater than 0".to_string(),
            ));
        }

        if self.processing.workers > MAX_PARALLEL_WORKERS {
            return Err(Error::configuration(format!(
                "Number of workers cannot exceed {}",
                MAX_PARALLEL_WORKERS
            )));
        }

        if self.processing.batch_size == 0 {
            return Err(Error::configuration(
                "Batch size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Parser options derived from the processing settings
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            strict: self.processing.strict,
            max_recorded_errors: self.processing.max_recorded_errors,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::configuration(format!("Invalid value for {}: '{}'", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.processing.batch_size, DEFAULT_BATCH_SIZE);
        assert!(!config.processing.strict);
        assert_eq!(config.output.format, OutputFormat::Human);
    }

    #[test]
    fn test_load_from_file_partial_sections() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[processing]\nworkers = 3\nstrict = true\n\n[output]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.processing.workers, 3);
        assert!(config.processing.strict);
        assert_eq!(config.processing.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.show_progress);
    }

    #[test]
    fn test_load_from_file_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[processing\nworkers = ").unwrap();

        let result = Config::load_from_file(file.path());
        assert!(matches!(result, Err(Error::ConfigParsing { .. })));
    }

    #[test]
    fn test_load_layered_missing_explicit_file() {
        let result = Config::load_layered(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_overrides(lookup_from(&[
                (env_vars::WORKERS, "2"),
                (env_vars::BATCH_SIZE, " 128 "),
                (env_vars::STRICT, "true"),
            ]))
            .unwrap();

        assert_eq!(config.processing.workers, 2);
        assert_eq!(config.processing.batch_size, 128);
        assert!(config.processing.strict);
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        let mut config = Config::default();
        let result = config.apply_env_overrides(lookup_from(&[(env_vars::WORKERS, "many")]));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_validate_limits() {
        let mut config = Config::default();
        config.processing.workers = 0;
        assert!(config.validate().is_err());

        config.processing.workers = MAX_PARALLEL_WORKERS + 1;
        assert!(config.validate().is_err());

        config.processing.workers = 1;
        config.processing.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parser_options_follow_processing() {
        let mut config = Config::default();
        config.processing.strict = true;
        config.processing.max_recorded_errors = 7;

        let options = config.parser_options();
        assert!(options.strict);
        assert_eq!(options.max_recorded_errors, 7);
    }
}
