//! Parsing statistics and result structures for MPCORB processing
//!
//! This module provides types for tracking how many lines were read, how
//! many of them were records, and how many of those decoded.

use crate::app::models::MinorPlanet;
use crate::constants::SUCCESS_RATE_THRESHOLD;

use super::error::DecodeError;

/// Parsing result with decoded records and statistics
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Successfully decoded records, in input order
    pub planets: Vec<MinorPlanet>,

    /// Parsing statistics
    pub stats: ParseStats,
}

impl ParseResult {
    /// Append another result (e.g. a later batch) to this one
    pub fn merge(&mut self, other: ParseResult, max_recorded_errors: usize) {
        self.planets.extend(other.planets);
        self.stats.merge(other.stats, max_recorded_errors);
    }
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of lines read from the input
    pub total_lines: usize,

    /// Lines that were not record-length (headers, separators, blanks)
    pub lines_skipped: usize,

    /// Record-length lines handed to the decoder
    pub candidate_records: usize,

    /// Records decoded successfully
    pub records_decoded: usize,

    /// Records rejected by the decoder
    pub records_failed: usize,

    /// First decode failures, for debugging
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a rejected record, keeping its message while under `max_recorded_errors`
    pub fn record_failure(
        &mut self,
        line_number: usize,
        error: &DecodeError,
        max_recorded_errors: usize,
    ) {
        self.records_failed += 1;
        if self.errors.len() < max_recorded_errors {
            self.errors.push(format!("Line {}: {}", line_number, error));
        }
    }

    /// Fold another set of statistics into this one
    pub fn merge(&mut self, other: ParseStats, max_recorded_errors: usize) {
        self.total_lines += other.total_lines;
        self.lines_skipped += other.lines_skipped;
        self.candidate_records += other.candidate_records;
        self.records_decoded += other.records_decoded;
        self.records_failed += other.records_failed;

        let room = max_recorded_errors.saturating_sub(self.errors.len());
        self.errors.extend(other.errors.into_iter().take(room));
    }

    /// Decoded records as a percentage of candidate records
    pub fn success_rate(&self) -> f64 {
        if self.candidate_records == 0 {
            0.0
        } else {
            (self.records_decoded as f64 / self.candidate_records as f64) * 100.0
        }
    }

    /// Check if parsing was mostly successful
    pub fn is_successful(&self) -> bool {
        self.success_rate() > SUCCESS_RATE_THRESHOLD
    }
}
