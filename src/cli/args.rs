//! Command-line argument definitions for the MPCORB processor
//!
//! Defines the CLI surface with the clap derive API. Flags shared by every
//! subcommand live in [`CommonArgs`] and are flattened into each one.

use crate::app::adapters::filesystem::STDIN_PATH;
use crate::config::Config;
use crate::constants::MAX_PARALLEL_WORKERS;
use crate::{Error, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub use crate::config::OutputFormat;

/// CLI arguments for the MPCORB processor
///
/// Decodes Minor Planet Center MPCORB orbital-element catalogs, plain or
/// gzip-compressed, into typed records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mpcorb-processor",
    version,
    about = "Decode Minor Planet Center MPCORB orbital-element catalogs",
    long_about = "Reads MPCORB.DAT (or MPCORB.DAT.gz) exports from the Minor Planet Center, \
                  decodes every fixed-column record including packed designations and epochs, \
                  and lists or validates the result."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Decode a catalog and list its records
    List(ListArgs),
    /// Decode a catalog and report records that fail to decode
    Validate(ValidateArgs),
}

/// Flags accepted by every subcommand
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// `<config dir>/mpcorb-processor/config.toml`.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Number of batches decoded concurrently
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of parallel decode workers"
    )]
    pub workers: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the list command
#[derive(Debug, Clone, Parser)]
pub struct ListArgs {
    /// Catalog to read (`-` for standard input)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Output format for decoded records
    #[arg(long = "format", value_enum, help = "Output format for records")]
    pub format: Option<OutputFormat>,

    /// Stop after this many records
    #[arg(short = 'n', long = "limit", value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Abort on the first record that fails to decode
    #[arg(long = "strict")]
    pub strict: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the validate command
#[derive(Debug, Clone, Parser)]
pub struct ValidateArgs {
    /// Catalog to read (`-` for standard input)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Maximum number of failure messages to report
    #[arg(long = "max-errors", value_name = "COUNT")]
    pub max_errors: Option<usize>,

    /// Output format for the validation report
    #[arg(long = "format", value_enum, help = "Output format for the report")]
    pub format: Option<OutputFormat>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validate the shared flags
    pub fn validate(&self) -> Result<()> {
        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(Error::configuration(
                    "Number of workers must be greater than 0".to_string(),
                ));
            }
            if workers > MAX_PARALLEL_WORKERS {
                return Err(Error::configuration(format!(
                    "Number of workers cannot exceed {}",
                    MAX_PARALLEL_WORKERS
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    fn apply_to(&self, config: &mut Config) {
        if let Some(workers) = self.workers {
            config.processing.workers = workers;
        }
        if !self.show_progress() {
            config.output.show_progress = false;
        }
    }
}

fn validate_input(input: &Path) -> Result<()> {
    if input.as_os_str() == STDIN_PATH {
        return Ok(());
    }
    if !input.exists() {
        return Err(Error::file_not_found(input.display().to_string()));
    }
    if input.is_dir() {
        return Err(Error::configuration(format!(
            "Input path is a directory: {}",
            input.display()
        )));
    }
    Ok(())
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<&Commands> {
        self.command.as_ref()
    }
}

impl ListArgs {
    /// Validate the list command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_input(&self.input)?;
        self.common.validate()?;

        if self.limit == Some(0) {
            return Err(Error::configuration(
                "Limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&self, config: &mut Config) {
        self.common.apply_to(config);
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.strict {
            config.processing.strict = true;
        }
    }
}

impl ValidateArgs {
    /// Validate the validate command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_input(&self.input)?;
        self.common.validate()?;

        if self.format == Some(OutputFormat::Csv) {
            return Err(Error::configuration(
                "Validation reports support human or json output".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply CLI argument overrides to configuration
    ///
    /// Validation always runs lenient so every failing record is counted.
    pub fn apply_cli_overrides(&self, config: &mut Config) {
        self.common.apply_to(config);
        config.processing.strict = false;
        if let Some(max_errors) = self.max_errors {
            config.processing.max_recorded_errors = max_errors;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn list_args(input: PathBuf) -> ListArgs {
        ListArgs {
            input,
            format: None,
            limit: None,
            strict: false,
            common: CommonArgs::default(),
        }
    }

    #[test]
    fn test_parse_list_command() {
        let args = Args::try_parse_from([
            "mpcorb-processor",
            "list",
            "MPCORB.DAT",
            "--format",
            "json",
            "-n",
            "10",
            "-vv",
            "-j",
            "4",
        ])
        .unwrap();

        match args.get_command() {
            Some(Commands::List(list)) => {
                assert_eq!(list.input, PathBuf::from("MPCORB.DAT"));
                assert_eq!(list.format, Some(OutputFormat::Json));
                assert_eq!(list.limit, Some(10));
                assert_eq!(list.common.verbose, 2);
                assert_eq!(list.common.workers, Some(4));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["mpcorb-processor", "validate", "x", "-q", "-v"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level() {
        let mut common = CommonArgs::default();
        assert_eq!(common.get_log_level(), "warn");

        common.verbose = 1;
        assert_eq!(common.get_log_level(), "info");

        common.verbose = 2;
        assert_eq!(common.get_log_level(), "debug");

        common.verbose = 3;
        assert_eq!(common.get_log_level(), "trace");

        common.quiet = true;
        assert_eq!(common.get_log_level(), "error");
        assert!(!common.show_progress());
    }

    #[test]
    fn test_list_args_validation() {
        let file = NamedTempFile::new().unwrap();
        let args = list_args(file.path().to_path_buf());
        assert!(args.validate().is_ok());

        let mut invalid = args.clone();
        invalid.limit = Some(0);
        assert!(invalid.validate().is_err());

        let mut invalid = args.clone();
        invalid.common.workers = Some(0);
        assert!(invalid.validate().is_err());

        let mut invalid = args.clone();
        invalid.common.workers = Some(MAX_PARALLEL_WORKERS + 1);
        assert!(invalid.validate().is_err());

        let missing = list_args(PathBuf::from("/nonexistent/MPCORB.DAT"));
        assert!(matches!(missing.validate(), Err(Error::FileNotFound { .. })));

        let stdin = list_args(PathBuf::from(STDIN_PATH));
        assert!(stdin.validate().is_ok());
    }

    #[test]
    fn test_list_overrides() {
        let mut args = list_args(PathBuf::from(STDIN_PATH));
        args.format = Some(OutputFormat::Csv);
        args.strict = true;
        args.common.workers = Some(3);
        args.common.quiet = true;

        let mut config = Config::default();
        args.apply_cli_overrides(&mut config);

        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(config.processing.strict);
        assert_eq!(config.processing.workers, 3);
        assert!(!config.output.show_progress);
    }

    #[test]
    fn test_validate_overrides_force_lenient() {
        let args = ValidateArgs {
            input: PathBuf::from(STDIN_PATH),
            max_errors: Some(5),
            format: None,
            common: CommonArgs::default(),
        };

        let mut config = Config::default();
        config.processing.strict = true;
        args.apply_cli_overrides(&mut config);

        assert!(!config.processing.strict);
        assert_eq!(config.processing.max_recorded_errors, 5);
        assert_eq!(config.output.format, OutputFormat::Human);
    }

    #[test]
    fn test_validate_rejects_csv() {
        let args = ValidateArgs {
            input: PathBuf::from(STDIN_PATH),
            max_errors: None,
            format: Some(OutputFormat::Csv),
            common: CommonArgs::default(),
        };
        assert!(args.validate().is_err());
    }
}
