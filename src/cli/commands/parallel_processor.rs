//! Batched parallel decoding of MPCORB catalogs
//!
//! A blocking reader task collects candidate lines into batches and hands
//! them over a bounded channel. Each batch is decoded on the blocking pool,
//! with at most `workers` batches in flight. Results come back in input
//! order, so the merged output matches a sequential decode.

use crate::app::models::MinorPlanet;
use crate::app::services::mpcorb_parser::{CandidateLine, MpcOrbParser, ParseResult, RecordLines};
use crate::config::Config;
use crate::{Error, Result};

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use std::io::BufRead;
use std::ops::ControlFlow;
use std::pin::pin;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Parallel decoder for whole catalogs
#[derive(Debug, Clone)]
pub struct ParallelDecoder {
    parser: MpcOrbParser,
    workers: usize,
    batch_size: usize,
}

impl ParallelDecoder {
    /// Create a decoder; zero workers or batch size are raised to one
    pub fn new(parser: MpcOrbParser, workers: usize, batch_size: usize) -> Self {
        Self {
            parser,
            workers: workers.max(1),
            batch_size: batch_size.max(1),
        }
    }

    /// Create a decoder from processing settings
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            MpcOrbParser::new(config.parser_options()),
            config.processing.workers,
            config.processing.batch_size,
        )
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Decode every record from `reader`, collecting them in input order
    ///
    /// In strict mode the first failing record, in input order, aborts the
    /// run. Progress, when given, advances by candidate records decoded.
    pub async fn decode_reader<R>(
        &self,
        reader: R,
        progress: Option<ProgressBar>,
    ) -> Result<ParallelDecodeResult>
    where
        R: BufRead + Send + 'static,
    {
        let mut planets = Vec::new();
        let mut output = self
            .decode_each(reader, progress, |batch| {
                planets.extend(batch);
                Ok(ControlFlow::Continue(()))
            })
            .await?;
        output.result.planets = planets;
        Ok(output)
    }

    /// Decode `reader`, handing each batch of records to `sink` in input order
    ///
    /// Only statistics are accumulated; records are not retained. When the
    /// sink returns [`ControlFlow::Break`] no further batches are decoded and
    /// the reader stops at its next send.
    pub async fn decode_each<R, F>(
        &self,
        reader: R,
        progress: Option<ProgressBar>,
        mut sink: F,
    ) -> Result<ParallelDecodeResult>
    where
        R: BufRead + Send + 'static,
        F: FnMut(Vec<MinorPlanet>) -> Result<ControlFlow<()>>,
    {
        let start_time = Instant::now();
        let max_errors = self.parser.options().max_recorded_errors;
        let batch_size = self.batch_size;

        info!(
            "Decoding with {} workers, {} lines per batch",
            self.workers, self.batch_size
        );

        let (tx, rx) = mpsc::channel::<Vec<CandidateLine>>(self.workers * 2);

        let reader_task = tokio::task::spawn_blocking(move || -> Result<(usize, usize)> {
            let mut lines = RecordLines::new(reader);
            let mut batch = Vec::with_capacity(batch_size);

            for candidate in lines.by_ref() {
                batch.push(candidate?);
                if batch.len() == batch_size {
                    let full = std::mem::replace(&mut batch, Vec::with_capacity(batch_size));
                    if tx.blocking_send(full).is_err() {
                        // Consumer stopped early (limit, strict failure or interrupt)
                        debug!("Batch receiver closed, stopping reader");
                        return Ok((lines.total_lines(), lines.lines_skipped()));
                    }
                }
            }

            if !batch.is_empty() {
                let _ = tx.blocking_send(batch);
            }

            Ok((lines.total_lines(), lines.lines_skipped()))
        });

        let mut result = ParseResult::default();
        let mut batches_processed = 0;

        {
            let batches = stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|batch| (batch, rx))
            });

            let decoded = batches
                .map(|batch| {
                    let parser = self.parser.clone();
                    tokio::task::spawn_blocking(move || parser.decode_batch(&batch))
                })
                .buffered(self.workers);
            let mut decoded = pin!(decoded);

            while let Some(joined) = decoded.next().await {
                let mut batch_result = joined
                    .map_err(|e| Error::task_failed(format!("Batch decode panicked: {}", e)))??;

                if let Some(pb) = &progress {
                    pb.inc(batch_result.stats.candidate_records as u64);
                }

                batches_processed += 1;
                let planets = std::mem::take(&mut batch_result.planets);
                result.merge(batch_result, max_errors);

                if sink(planets)?.is_break() {
                    debug!("Record sink stopped after {} batches", batches_processed);
                    break;
                }
            }
        }
        // The receiver is dropped with the stream above, so a reader blocked
        // on a full channel returns before it is awaited here.

        let (total_lines, lines_skipped) = reader_task
            .await
            .map_err(|e| Error::task_failed(format!("Catalog reader panicked: {}", e)))??;
        result.stats.total_lines = total_lines;
        result.stats.lines_skipped = lines_skipped;

        let output = ParallelDecodeResult {
            result,
            batches_processed,
            processing_time: start_time.elapsed(),
        };
        info!(
            "Decoded {} records in {} batches in {:.2}s ({:.0} records/s)",
            output.result.stats.records_decoded,
            output.batches_processed,
            output.processing_time.as_secs_f64(),
            output.records_per_second()
        );

        Ok(output)
    }
}

/// Output of [`ParallelDecoder::decode_reader`]
#[derive(Debug, Default)]
pub struct ParallelDecodeResult {
    pub result: ParseResult,
    pub batches_processed: usize,
    pub processing_time: Duration,
}

impl ParallelDecodeResult {
    /// Candidate records decoded per second
    pub fn records_per_second(&self) -> f64 {
        if self.processing_time.as_secs_f64() > 0.0 {
            self.result.stats.candidate_records as f64 / self.processing_time.as_secs_f64()
        } else {
            0.0
        }
    }
}
