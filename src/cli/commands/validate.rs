//! Validate command implementation
//!
//! Decodes a whole catalog leniently, then reports statistics and the first
//! failing records. Any failure makes the command exit non-zero.

use super::parallel_processor::ParallelDecoder;
use super::shared::{
    ProcessingStats, create_progress_bar, load_configuration, print_summary, setup_logging,
};
use crate::app::adapters::filesystem::open_catalog;
use crate::app::services::mpcorb_parser::ParseStats;
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::{Error, Result};
use colored::*;
use serde::Serialize;
use std::ops::ControlFlow;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Machine-readable validation report
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub file: String,
    pub passed: bool,
    pub success_rate: f64,
    pub processing_time_secs: f64,
    pub stats: ParseStats,
}

impl ValidationReport {
    pub fn new(file: impl Into<String>, stats: &ProcessingStats) -> Self {
        Self {
            file: file.into(),
            passed: !stats.has_failures(),
            success_rate: stats.parse.success_rate(),
            processing_time_secs: stats.processing_time.as_secs_f64(),
            stats: stats.parse.clone(),
        }
    }
}

/// Validate command runner
pub async fn run_validate(args: ValidateArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Validation arguments: {:?}", args);
    args.validate()?;

    let mut config = load_configuration(&args.common)?;
    args.apply_cli_overrides(&mut config);
    config.validate()?;

    info!("Validating {}", args.input.display());

    let reader = open_catalog(&args.input)?;
    let decoder = ParallelDecoder::from_config(&config);
    let progress = config
        .output
        .show_progress
        .then(|| create_progress_bar("checked"));

    let output = decoder
        .decode_each(reader, progress.clone(), |_| Ok(ControlFlow::Continue(())))
        .await?;
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    let stats = ProcessingStats {
        parse: output.result.stats,
        records_emitted: 0,
        processing_time: start_time.elapsed(),
    };

    let report = ValidationReport::new(args.input.display().to_string(), &stats);
    match config.output.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| Error::serialization("Failed to serialize validation report", e))?;
            println!("{}", json);
        }
        _ => print_human_report(&report, &stats),
    }

    if stats.has_failures() {
        warn!(
            "{} of {} records failed to decode",
            stats.parse.records_failed, stats.parse.candidate_records
        );
        return Err(Error::validation_failed(
            stats.parse.records_failed,
            stats.parse.candidate_records,
        ));
    }

    Ok(stats)
}

fn print_human_report(report: &ValidationReport, stats: &ProcessingStats) {
    print_summary(stats);

    if !report.stats.errors.is_empty() {
        eprintln!("\n{}", "First decode failures".bright_yellow().bold());
        for error in &report.stats.errors {
            eprintln!("  {}", error);
        }
        let unlisted = report
            .stats
            .records_failed
            .saturating_sub(report.stats.errors.len());
        if unlisted > 0 {
            eprintln!("  ... and {} more", unlisted);
        }
    }

    let verdict = if report.passed {
        "PASSED".bright_green().bold()
    } else {
        "FAILED".bright_red().bold()
    };
    eprintln!("\n{}: {}", report.file, verdict);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_report_from_clean_stats() {
        let stats = ProcessingStats {
            parse: ParseStats {
                total_lines: 45,
                lines_skipped: 43,
                candidate_records: 2,
                records_decoded: 2,
                ..Default::default()
            },
            records_emitted: 0,
            processing_time: Duration::from_millis(500),
        };

        let report = ValidationReport::new("MPCORB.DAT", &stats);
        assert!(report.passed);
        assert_eq!(report.success_rate, 100.0);
        assert_eq!(report.processing_time_secs, 0.5);
    }

    #[test]
    fn test_report_serializes_failures() {
        let stats = ProcessingStats {
            parse: ParseStats {
                candidate_records: 2,
                records_decoded: 1,
                records_failed: 1,
                errors: vec!["Line 44: boom".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };

        let report = ValidationReport::new("MPCORB.DAT", &stats);
        assert!(!report.passed);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["passed"], false);
        assert_eq!(value["stats"]["records_failed"], 1);
        assert_eq!(value["stats"]["errors"][0], "Line 44: boom");
    }
}
