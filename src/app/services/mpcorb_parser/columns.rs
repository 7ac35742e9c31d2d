//! Fixed column layout and per-field decode policy for MPCORB records
//!
//! The layout is byte-exact (0-indexed, half-open ranges). The policy table
//! decides, per column, whether a decode failure aborts the record or is
//! replaced by zero.

use std::fmt;
use std::ops::Range;

/// One logical column of an MPCORB record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    AbsoluteMagnitude,
    Slope,
    Epoch,
    MeanAnomalyEpoch,
    ArgumentOfPerihelion,
    LongitudeOfAscendingNode,
    InclinationToEcliptic,
    OrbitalEccentricity,
    MeanDailyMotion,
    SemimajorAxis,
    UncertaintyParameter,
    Reference,
    NumberOfObservations,
    NumberOfOppositions,
    /// Whole conditional column when read as `<n> days`
    ArcLength,
    YearOfFirstObservation,
    YearOfLastObservation,
    RmsResidual,
    CoarseIndicatorOfPerturbers,
    PreciseIndicatorOfPerturbers,
    ComputerName,
    HexDigitFlags,
    ReadableDesignation,
    DateOfLastObservation,
}

/// How the record assembler treats a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Decode failure aborts the whole record
    Required,
    /// Decode failure is replaced by zero
    OptionalDefaultZero,
    /// Packed encoding; decoding cannot fail
    Packed,
    /// Free-form text, taken as trimmed
    Text,
}

impl Field {
    /// Every column, in record order. `ArcLength` overlaps the two year columns.
    pub const ALL: [Field; 25] = [
        Field::Id,
        Field::AbsoluteMagnitude,
        Field::Slope,
        Field::Epoch,
        Field::MeanAnomalyEpoch,
        Field::ArgumentOfPerihelion,
        Field::LongitudeOfAscendingNode,
        Field::InclinationToEcliptic,
        Field::OrbitalEccentricity,
        Field::MeanDailyMotion,
        Field::SemimajorAxis,
        Field::UncertaintyParameter,
        Field::Reference,
        Field::NumberOfObservations,
        Field::NumberOfOppositions,
        Field::ArcLength,
        Field::YearOfFirstObservation,
        Field::YearOfLastObservation,
        Field::RmsResidual,
        Field::CoarseIndicatorOfPerturbers,
        Field::PreciseIndicatorOfPerturbers,
        Field::ComputerName,
        Field::HexDigitFlags,
        Field::ReadableDesignation,
        Field::DateOfLastObservation,
    ];

    /// Byte range of the column within a record line
    pub const fn columns(self) -> Range<usize> {
        match self {
            Field::Id => 0..7,
            Field::AbsoluteMagnitude => 8..13,
            Field::Slope => 14..19,
            Field::Epoch => 20..25,
            Field::MeanAnomalyEpoch => 26..35,
            Field::ArgumentOfPerihelion => 37..47,
            Field::LongitudeOfAscendingNode => 48..57,
            Field::InclinationToEcliptic => 59..68,
            Field::OrbitalEccentricity => 70..79,
            Field::MeanDailyMotion => 80..91,
            Field::SemimajorAxis => 92..103,
            Field::UncertaintyParameter => 105..106,
            Field::Reference => 107..116,
            Field::NumberOfObservations => 117..122,
            Field::NumberOfOppositions => 123..126,
            Field::ArcLength => 127..136,
            Field::YearOfFirstObservation => 127..131,
            Field::YearOfLastObservation => 132..136,
            Field::RmsResidual => 137..141,
            Field::CoarseIndicatorOfPerturbers => 142..145,
            Field::PreciseIndicatorOfPerturbers => 146..149,
            Field::ComputerName => 150..160,
            Field::HexDigitFlags => 161..165,
            Field::ReadableDesignation => 166..194,
            Field::DateOfLastObservation => 194..202,
        }
    }

    /// Decode policy for the column
    pub const fn policy(self) -> FieldPolicy {
        match self {
            Field::AbsoluteMagnitude
            | Field::Slope
            | Field::NumberOfObservations
            | Field::RmsResidual => FieldPolicy::OptionalDefaultZero,

            Field::MeanAnomalyEpoch
            | Field::ArgumentOfPerihelion
            | Field::LongitudeOfAscendingNode
            | Field::InclinationToEcliptic
            | Field::OrbitalEccentricity
            | Field::MeanDailyMotion
            | Field::SemimajorAxis
            | Field::NumberOfOppositions
            | Field::ArcLength
            | Field::YearOfFirstObservation
            | Field::YearOfLastObservation
            | Field::HexDigitFlags
            | Field::DateOfLastObservation => FieldPolicy::Required,

            Field::Id | Field::Epoch => FieldPolicy::Packed,

            Field::UncertaintyParameter
            | Field::Reference
            | Field::CoarseIndicatorOfPerturbers
            | Field::PreciseIndicatorOfPerturbers
            | Field::ComputerName
            | Field::ReadableDesignation => FieldPolicy::Text,
        }
    }

    /// Human-readable column name used in error messages and CSV headers
    pub const fn name(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::AbsoluteMagnitude => "absolute_magnitude",
            Field::Slope => "slope",
            Field::Epoch => "epoch",
            Field::MeanAnomalyEpoch => "mean_anomaly_epoch",
            Field::ArgumentOfPerihelion => "argument_of_perihelion",
            Field::LongitudeOfAscendingNode => "longitude_of_ascending_node",
            Field::InclinationToEcliptic => "inclination_to_ecliptic",
            Field::OrbitalEccentricity => "orbital_eccentricity",
            Field::MeanDailyMotion => "mean_daily_motion",
            Field::SemimajorAxis => "semimajor_axis",
            Field::UncertaintyParameter => "uncertainty_parameter",
            Field::Reference => "reference",
            Field::NumberOfObservations => "number_of_observations",
            Field::NumberOfOppositions => "number_of_oppositions",
            Field::ArcLength => "arc_length",
            Field::YearOfFirstObservation => "year_of_first_observation",
            Field::YearOfLastObservation => "year_of_last_observation",
            Field::RmsResidual => "rms_residual",
            Field::CoarseIndicatorOfPerturbers => "coarse_indicator_of_perturbers",
            Field::PreciseIndicatorOfPerturbers => "precise_indicator_of_perturbers",
            Field::ComputerName => "computer_name",
            Field::HexDigitFlags => "hex_digit_flags",
            Field::ReadableDesignation => "readable_designation",
            Field::DateOfLastObservation => "date_of_last_observation",
        }
    }

    /// Whether a decode failure in this column aborts the record
    pub const fn is_required(self) -> bool {
        matches!(self.policy(), FieldPolicy::Required)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
