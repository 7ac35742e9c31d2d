//! Core MPCORB reader implementation
//!
//! This module provides the line source that picks record-length lines out of
//! a catalog (skipping the header banner, separators and blank lines) and the
//! parser that feeds those lines through the record decoder.

use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, trace, warn};

use super::record_parser::decode_record;
use super::stats::{ParseResult, ParseStats};
use crate::app::adapters::filesystem::open_catalog;
use crate::app::models::MinorPlanet;
use crate::constants::{DEFAULT_MAX_RECORDED_ERRORS, MAX_RECORD_LEN, RECORD_LEN};
use crate::{Error, Result};

/// A record-length line and its 1-based position in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLine {
    pub line_number: usize,
    pub text: String,
}

/// Lazy, finite, non-restartable sequence of candidate record lines
///
/// Lines are kept when, without their terminator, they are ASCII and
/// [`RECORD_LEN`] or [`MAX_RECORD_LEN`] bytes long. Everything else is counted
/// and skipped.
#[derive(Debug)]
pub struct RecordLines<R> {
    reader: R,
    buffer: Vec<u8>,
    total_lines: usize,
    lines_skipped: usize,
}

impl<R: BufRead> RecordLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(MAX_RECORD_LEN + 2),
            total_lines: 0,
            lines_skipped: 0,
        }
    }

    /// Lines read so far
    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Lines read so far that were not records
    pub fn lines_skipped(&self) -> usize {
        self.lines_skipped
    }
}

impl<R: BufRead> Iterator for RecordLines<R> {
    type Item = Result<CandidateLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(Error::io("Failed to read catalog line", e))),
            }
            self.total_lines += 1;

            let mut line = self.buffer.as_slice();
            if let Some(stripped) = line.strip_suffix(b"\n") {
                line = stripped;
            }
            if let Some(stripped) = line.strip_suffix(b"\r") {
                line = stripped;
            }

            if (RECORD_LEN..=MAX_RECORD_LEN).contains(&line.len()) && line.is_ascii() {
                // ASCII is always valid UTF-8
                let text = String::from_utf8_lossy(line).into_owned();
                return Some(Ok(CandidateLine {
                    line_number: self.total_lines,
                    text,
                }));
            }

            self.lines_skipped += 1;
            trace!(
                "Skipping line {} ({} bytes, not a record)",
                self.total_lines,
                line.len()
            );
        }
    }
}

/// Options controlling how decode failures are handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Abort on the first record that fails to decode
    pub strict: bool,

    /// Number of failure messages kept in [`ParseStats::errors`]
    pub max_recorded_errors: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_recorded_errors: DEFAULT_MAX_RECORDED_ERRORS,
        }
    }
}

/// MPCORB catalog parser
///
/// Decoding is stateless; the parser only carries options, so it can be
/// cloned freely into worker tasks.
#[derive(Debug, Clone, Default)]
pub struct MpcOrbParser {
    options: ParserOptions,
}

impl MpcOrbParser {
    /// Create a new parser with the given options
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse an MPCORB file (plain or gzip-compressed)
    pub fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Parsing MPCORB file: {}", file_path.display());

        let reader = open_catalog(file_path)?;
        let result = self.parse_reader(reader)?;

        info!(
            "Decoded {} of {} records ({} lines skipped)",
            result.stats.records_decoded,
            result.stats.candidate_records,
            result.stats.lines_skipped
        );
        if !result.stats.is_successful() && result.stats.candidate_records > 0 {
            warn!(
                "Only {:.1}% of records in {} decoded",
                result.stats.success_rate(),
                file_path.display()
            );
        }

        Ok(result)
    }

    /// Parse catalog text already in memory
    pub fn parse_str(&self, content: &str) -> Result<ParseResult> {
        self.parse_reader(content.as_bytes())
    }

    /// Parse every record from a buffered reader
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<ParseResult> {
        let mut result = ParseResult::default();
        let mut lines = RecordLines::new(reader);

        for candidate in lines.by_ref() {
            let candidate = candidate?;
            self.decode_candidate(&candidate, &mut result)?;
        }

        result.stats.total_lines = lines.total_lines();
        result.stats.lines_skipped = lines.lines_skipped();
        Ok(result)
    }

    /// Decode a batch of candidate lines collected by [`RecordLines`]
    pub fn decode_batch(&self, batch: &[CandidateLine]) -> Result<ParseResult> {
        let mut result = ParseResult {
            planets: Vec::with_capacity(batch.len()),
            stats: ParseStats::new(),
        };

        for candidate in batch {
            self.decode_candidate(candidate, &mut result)?;
        }

        Ok(result)
    }

    /// Lazily decode records, one per call to `next`
    pub fn read_entries<R: BufRead>(&self, reader: R) -> Entries<R> {
        Entries {
            lines: RecordLines::new(reader),
        }
    }

    fn decode_candidate(&self, candidate: &CandidateLine, result: &mut ParseResult) -> Result<()> {
        result.stats.candidate_records += 1;

        match decode_record(&candidate.text) {
            Ok(planet) => {
                result.planets.push(planet);
                result.stats.records_decoded += 1;
            }
            Err(e) => {
                if self.options.strict {
                    return Err(Error::decode(candidate.line_number, e));
                }
                debug!("Skipped record at line {}: {}", candidate.line_number, e);
                result.stats.record_failure(
                    candidate.line_number,
                    &e,
                    self.options.max_recorded_errors,
                );
            }
        }

        Ok(())
    }
}

/// Iterator returned by [`MpcOrbParser::read_entries`]
///
/// Each item is the next record-length line decoded, or the error for that
/// line; iteration can continue past a failed record.
#[derive(Debug)]
pub struct Entries<R> {
    lines: RecordLines<R>,
}

impl<R> Entries<R> {
    /// Underlying line source, for its counters
    pub fn lines(&self) -> &RecordLines<R> {
        &self.lines
    }
}

impl<R: BufRead> Iterator for Entries<R> {
    type Item = Result<MinorPlanet>;

    fn next(&mut self) -> Option<Self::Item> {
        let candidate = match self.lines.next()? {
            Ok(candidate) => candidate,
            Err(e) => return Some(Err(e)),
        };

        Some(decode_record(&candidate.text).map_err(|e| Error::decode(candidate.line_number, e)))
    }
}
