//! List command implementation
//!
//! Decodes a catalog and writes records to stdout as each batch completes,
//! followed by a `read N records` count on stderr.

use super::parallel_processor::{ParallelDecodeResult, ParallelDecoder};
use super::shared::{
    ProcessingStats, create_progress_bar, load_configuration, print_summary, setup_logging,
};
use crate::app::adapters::filesystem::open_catalog;
use crate::app::models::MinorPlanet;
use crate::cli::args::{ListArgs, OutputFormat};
use crate::{Error, Result};
use indicatif::ProgressBar;
use std::io::{self, BufRead, BufWriter, Write};
use std::ops::ControlFlow;
use std::time::Instant;
use tracing::{debug, info};

/// Column header for CSV output
pub const CSV_HEADER: [&str; 25] = [
    "id",
    "readable_designation",
    "absolute_magnitude",
    "slope",
    "epoch",
    "mean_anomaly_epoch",
    "argument_of_perihelion",
    "longitude_of_ascending_node",
    "inclination_to_ecliptic",
    "orbital_eccentricity",
    "mean_daily_motion",
    "semimajor_axis",
    "uncertainty_parameter",
    "reference",
    "number_of_observations",
    "number_of_oppositions",
    "year_of_first_observation",
    "year_of_last_observation",
    "arc_length",
    "rms_residual",
    "coarse_indicator_of_perturbers",
    "precise_indicator_of_perturbers",
    "computer_name",
    "hex_digit_flags",
    "date_of_last_observation",
];

/// List command runner
pub async fn run_list(args: ListArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("List arguments: {:?}", args);
    args.validate()?;

    let mut config = load_configuration(&args.common)?;
    args.apply_cli_overrides(&mut config);
    config.validate()?;

    info!("Listing records from {}", args.input.display());

    let reader = open_catalog(&args.input)?;
    let decoder = ParallelDecoder::from_config(&config);
    let progress = config
        .output
        .show_progress
        .then(|| create_progress_bar("decoded"));

    let mut writer = RecordWriter::new(BufWriter::new(io::stdout()), config.output.format)?;
    let (output, emitted) =
        list_records(&decoder, reader, progress.clone(), &mut writer, args.limit).await?;
    writer.flush()?;
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }

    eprintln!("read {} records", emitted);

    let stats = ProcessingStats {
        parse: output.result.stats,
        records_emitted: emitted,
        processing_time: start_time.elapsed(),
    };

    if config.output.show_progress && config.output.format == OutputFormat::Human {
        print_summary(&stats);
    }

    Ok(stats)
}

/// Decode `reader` and write records as their batches complete
///
/// Stops decoding once `limit` records have been written. Returns the
/// decode statistics and the number of records written.
pub async fn list_records<R, W>(
    decoder: &ParallelDecoder,
    reader: R,
    progress: Option<ProgressBar>,
    writer: &mut RecordWriter<W>,
    limit: Option<usize>,
) -> Result<(ParallelDecodeResult, usize)>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let limit = limit.unwrap_or(usize::MAX);
    let mut emitted = 0;

    let output = decoder
        .decode_each(reader, progress, |batch| {
            for planet in batch.iter().take(limit - emitted) {
                writer.write(planet)?;
                emitted += 1;
            }
            Ok(if emitted >= limit {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            })
        })
        .await?;

    Ok((output, emitted))
}

/// Writes decoded records in one output format
pub enum RecordWriter<W: Write> {
    /// `id:readable_designation` per line
    Human(W),
    /// One JSON object per line
    Json(W),
    /// Header row, then one row per record
    Csv(csv::Writer<W>),
}

impl<W: Write> RecordWriter<W> {
    /// Create a writer; CSV output starts with the header row
    pub fn new(out: W, format: OutputFormat) -> Result<Self> {
        match format {
            OutputFormat::Human => Ok(Self::Human(out)),
            OutputFormat::Json => Ok(Self::Json(out)),
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(out);
                writer
                    .write_record(CSV_HEADER)
                    .map_err(|e| Error::csv("Failed to write CSV header", e))?;
                Ok(Self::Csv(writer))
            }
        }
    }

    pub fn write(&mut self, planet: &MinorPlanet) -> Result<()> {
        match self {
            Self::Human(out) => writeln!(out, "{}:{}", planet.id, planet.readable_designation)
                .map_err(|e| Error::io("Failed to write record", e)),
            Self::Json(out) => {
                serde_json::to_writer(&mut *out, planet)
                    .map_err(|e| Error::serialization("Failed to serialize record", e))?;
                writeln!(out).map_err(|e| Error::io("Failed to write record", e))
            }
            Self::Csv(writer) => writer
                .write_record(csv_row(planet))
                .map_err(|e| Error::csv("Failed to write CSV row", e)),
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        let flushed = match self {
            Self::Human(out) | Self::Json(out) => out.flush(),
            Self::Csv(writer) => writer.flush(),
        };
        flushed.map_err(|e| Error::io("Failed to flush record output", e))
    }
}

/// One CSV row in [`CSV_HEADER`] order
pub fn csv_row(planet: &MinorPlanet) -> [String; 25] {
    [
        planet.id.clone(),
        planet.readable_designation.clone(),
        planet.absolute_magnitude.to_string(),
        planet.slope.to_string(),
        planet.epoch.to_string(),
        planet.mean_anomaly_epoch.to_string(),
        planet.argument_of_perihelion.to_string(),
        planet.longitude_of_ascending_node.to_string(),
        planet.inclination_to_ecliptic.to_string(),
        planet.orbital_eccentricity.to_string(),
        planet.mean_daily_motion.to_string(),
        planet.semimajor_axis.to_string(),
        planet.uncertainty_parameter.clone(),
        planet.reference.clone(),
        planet.number_of_observations.to_string(),
        planet.number_of_oppositions.to_string(),
        planet.year_of_first_observation().to_string(),
        planet.year_of_last_observation().to_string(),
        planet.arc_length().to_string(),
        planet.rms_residual.to_string(),
        planet.coarse_indicator_of_perturbers.clone(),
        planet.precise_indicator_of_perturbers.clone(),
        planet.computer_name.clone(),
        format!("{:04X}", planet.hex_digit_flags),
        planet.date_of_last_observation.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::mpcorb_parser::{MpcOrbParser, decode_record};
    use std::io::Cursor;

    const CERES: &str = "00001    3.34  0.12 K13B4  10.55761   72.29213   80.32762   10.59398  0.0757973  0.21415869   2.7668073  0 MPO286777  6502 105 1802-2014 0.82 M-v 30h MPCLINUX   0000      (1) Ceres              20140307";

    fn ceres() -> MinorPlanet {
        decode_record(CERES).unwrap()
    }

    fn render(planets: &[MinorPlanet], format: OutputFormat) -> String {
        let mut out = Vec::new();
        let mut writer = RecordWriter::new(&mut out, format).unwrap();
        for planet in planets {
            writer.write(planet).unwrap();
        }
        writer.flush().unwrap();
        drop(writer);
        String::from_utf8(out).unwrap()
    }

    fn catalog(records: usize) -> Cursor<Vec<u8>> {
        let mut text = String::from("MINOR PLANET CENTER ORBIT DATABASE (MPCORB)\n\n");
        for _ in 0..records {
            text.push_str(CERES);
            text.push('\n');
        }
        Cursor::new(text.into_bytes())
    }

    #[test]
    fn test_human_output() {
        assert_eq!(render(&[ceres()], OutputFormat::Human), "1:(1) Ceres\n");
    }

    #[test]
    fn test_json_output_is_one_object_per_line() {
        let text = render(&[ceres(), ceres()], OutputFormat::Json);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["id"], "1");
        assert_eq!(value["epoch"], "2013-11-04");
        assert_eq!(value["observation_span"]["kind"], "years");
        assert_eq!(value["observation_span"]["first"], 1802);
    }

    #[test]
    fn test_csv_output_matches_header() {
        let text = render(&[ceres()], OutputFormat::Csv);
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        let row = lines.next().unwrap();

        assert_eq!(header, CSV_HEADER.join(","));
        assert_eq!(header.split(',').count(), row.split(',').count());
        assert!(row.starts_with("1,(1) Ceres,3.34,0.12,2013-11-04,"));
        assert!(row.ends_with(",MPCLINUX,0000,2014-03-07"));
    }

    #[test]
    fn test_csv_quotes_text_with_delimiters() {
        let mut planet = ceres();
        planet.readable_designation = "Ceres, \"the first\"".to_string();

        let text = render(&[planet], OutputFormat::Csv);
        let mut reader = csv::Reader::from_reader(text.as_bytes());

        assert_eq!(reader.headers().unwrap().len(), CSV_HEADER.len());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), CSV_HEADER.len());
        assert_eq!(&record[1], "Ceres, \"the first\"");
    }

    #[tokio::test]
    async fn test_limit_stops_decoding_early() {
        let decoder = ParallelDecoder::new(MpcOrbParser::default(), 1, 2);
        let mut out = Vec::new();
        let mut writer = RecordWriter::new(&mut out, OutputFormat::Human).unwrap();

        let (output, emitted) = list_records(&decoder, catalog(1000), None, &mut writer, Some(3))
            .await
            .unwrap();
        drop(writer);

        assert_eq!(emitted, 3);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
        // Two batches of two cover the limit; nothing past them is decoded
        assert_eq!(output.result.stats.candidate_records, 4);
        assert!(output.result.stats.total_lines < 1002);
    }

    #[tokio::test]
    async fn test_without_limit_writes_every_record() {
        let decoder = ParallelDecoder::new(MpcOrbParser::default(), 3, 4);
        let mut out = Vec::new();
        let mut writer = RecordWriter::new(&mut out, OutputFormat::Human).unwrap();

        let (output, emitted) = list_records(&decoder, catalog(10), None, &mut writer, None)
            .await
            .unwrap();
        drop(writer);

        assert_eq!(emitted, 10);
        assert_eq!(output.result.stats.records_decoded, 10);
        assert!(output.result.planets.is_empty());
        assert!(String::from_utf8(out).unwrap().lines().all(|l| l == "1:(1) Ceres"));
    }
}
