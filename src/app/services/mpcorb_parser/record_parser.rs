//! Single-record decoding for MPCORB lines
//!
//! This module assembles a [`MinorPlanet`] from one fixed-column line,
//! applying the per-field policy from [`super::columns`] and the
//! opposition-dependent interpretation of columns 127-136.

use std::str::FromStr;

use super::columns::Field;
use super::designation::resolve_packed_designation;
use super::error::DecodeError;
use super::field_parsers::{
    parse_arc_length, parse_optional_float, parse_optional_int, parse_plain_date,
    parse_required_float, parse_required_hex, parse_required_int, parse_text, raw_field,
    slice_field,
};
use super::packed::decode_packed_date;
use crate::app::models::{MinorPlanet, ObservationSpan};
use crate::constants::SINGLE_OPPOSITION_LIMIT;

/// Decode one record line into a [`MinorPlanet`]
///
/// Fields are decoded in column order and the first failing required field
/// aborts the record. The line is expected to be a full record; missing
/// trailing columns read as blank.
pub fn decode_record(line: &str) -> Result<MinorPlanet, DecodeError> {
    let id = resolve_packed_designation(raw_field(line, Field::Id.columns()));
    let absolute_magnitude = parse_optional_float(line, Field::AbsoluteMagnitude);
    let slope = parse_optional_float(line, Field::Slope);
    let epoch = decode_packed_date(slice_field(line, Field::Epoch.columns()))?;

    let mean_anomaly_epoch = parse_required_float(line, Field::MeanAnomalyEpoch)?;
    let argument_of_perihelion = parse_required_float(line, Field::ArgumentOfPerihelion)?;
    let longitude_of_ascending_node = parse_required_float(line, Field::LongitudeOfAscendingNode)?;
    let inclination_to_ecliptic = parse_required_float(line, Field::InclinationToEcliptic)?;
    let orbital_eccentricity = parse_required_float(line, Field::OrbitalEccentricity)?;
    let mean_daily_motion = parse_required_float(line, Field::MeanDailyMotion)?;
    let semimajor_axis = parse_required_float(line, Field::SemimajorAxis)?;

    let uncertainty_parameter = parse_text(line, Field::UncertaintyParameter);
    let reference = parse_text(line, Field::Reference);
    let number_of_observations = parse_optional_int(line, Field::NumberOfObservations);
    let number_of_oppositions = parse_required_int(line, Field::NumberOfOppositions)?;
    let observation_span = decode_observation_span(line, number_of_oppositions)?;

    let rms_residual = parse_optional_float(line, Field::RmsResidual);
    let coarse_indicator_of_perturbers = parse_text(line, Field::CoarseIndicatorOfPerturbers);
    let precise_indicator_of_perturbers = parse_text(line, Field::PreciseIndicatorOfPerturbers);
    let computer_name = parse_text(line, Field::ComputerName);
    let hex_digit_flags = parse_required_hex(line, Field::HexDigitFlags)?;
    let readable_designation = parse_text(line, Field::ReadableDesignation);
    let date_of_last_observation =
        parse_plain_date(slice_field(line, Field::DateOfLastObservation.columns()))?;

    Ok(MinorPlanet {
        id,
        absolute_magnitude,
        slope,
        epoch,
        mean_anomaly_epoch,
        argument_of_perihelion,
        longitude_of_ascending_node,
        inclination_to_ecliptic,
        orbital_eccentricity,
        mean_daily_motion,
        semimajor_axis,
        uncertainty_parameter,
        reference,
        number_of_observations,
        number_of_oppositions,
        observation_span,
        rms_residual,
        coarse_indicator_of_perturbers,
        precise_indicator_of_perturbers,
        computer_name,
        hex_digit_flags,
        readable_designation,
        date_of_last_observation,
    })
}

/// Read columns 127-136 according to the opposition count
///
/// More than one opposition: `YYYY-YYYY` first/last years. Otherwise:
/// `<n> days`. A blank column on a single-opposition orbit is a
/// [`DecodeError::MalformedArcLength`].
pub fn decode_observation_span(
    line: &str,
    number_of_oppositions: i64,
) -> Result<ObservationSpan, DecodeError> {
    if number_of_oppositions > SINGLE_OPPOSITION_LIMIT {
        Ok(ObservationSpan::Years {
            first: parse_required_int(line, Field::YearOfFirstObservation)?,
            last: parse_required_int(line, Field::YearOfLastObservation)?,
        })
    } else {
        let days = parse_arc_length(slice_field(line, Field::ArcLength.columns()))?;
        Ok(ObservationSpan::Arc { days })
    }
}

impl FromStr for MinorPlanet {
    type Err = DecodeError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        decode_record(line)
    }
}
