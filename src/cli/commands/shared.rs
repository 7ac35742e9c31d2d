//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading, progress display and the
//! statistics every command reports.

use crate::Result;
use crate::app::services::mpcorb_parser::ParseStats;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::constants::LOG_TARGET;
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info};

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Statistics from the catalog decode
    pub parse: ParseStats,
    /// Records written to stdout
    pub records_emitted: usize,
    /// Total processing time
    pub processing_time: Duration,
}

impl ProcessingStats {
    /// True when any candidate record failed to decode
    pub fn has_failures(&self) -> bool {
        self.parse.records_failed > 0
    }

    /// Records decoded per second of processing time
    pub fn records_per_second(&self) -> f64 {
        if self.processing_time.as_secs_f64() > 0.0 {
            self.parse.records_decoded as f64 / self.processing_time.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if let Err(e) = result {
        // A subscriber is already installed (tests, embedding)
        debug!("Logging already initialized: {}", e);
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (file -> env), then validate
///
/// Command-specific CLI overrides are applied by the caller before
/// [`Config::validate`] runs again.
pub fn load_configuration(args: &CommonArgs) -> Result<Config> {
    info!("Loading configuration");

    let config = Config::load_layered(args.config_file.as_deref())?;
    debug!("Configuration after file and environment: {:?}", config);

    Ok(config)
}

/// Create a spinner counting decoded records
pub fn create_progress_bar(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {pos} records {msg} [{per_sec}]",
    )
    .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a coloured decode summary to stderr
pub fn print_summary(stats: &ProcessingStats) {
    let parse = &stats.parse;

    eprintln!("\n{}", "Decode Summary".bright_green().bold());
    eprintln!(
        "  Lines read:        {}",
        parse.total_lines.to_string().bright_white().bold()
    );
    eprintln!("  Lines skipped:     {}", parse.lines_skipped);
    eprintln!(
        "  Records decoded:   {} of {} ({:.1}%)",
        parse.records_decoded.to_string().bright_white().bold(),
        parse.candidate_records,
        parse.success_rate()
    );
    if parse.records_failed > 0 {
        eprintln!(
            "  Records failed:    {}",
            parse.records_failed.to_string().bright_red().bold()
        );
    }
    eprintln!(
        "  Processing time:   {} ({:.0} records/sec)",
        HumanDuration(stats.processing_time),
        stats.records_per_second()
    );
}
