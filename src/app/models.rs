//! Data models for MPCORB processing
//!
//! This module contains the decoded representation of one MPCORB
//! orbital-elements record, following the Minor Planet Center's
//! fixed-column export format.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Observation Span
// =============================================================================

/// Observational coverage of an orbit
///
/// Multi-opposition orbits give the first and last years observed;
/// single-opposition orbits give the arc length in days instead. Exactly one
/// of the two forms exists per record, selected by the opposition count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObservationSpan {
    /// Years of first and last observation (more than one opposition)
    Years { first: i64, last: i64 },
    /// Arc length in days (one opposition or fewer)
    Arc { days: i64 },
}

// =============================================================================
// Minor Planet Record
// =============================================================================

/// One decoded MPCORB record
///
/// Built in a single call by the record assembler and never modified
/// afterwards. Optional numeric columns that were blank are stored as zero.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MinorPlanet {
    /// Canonical designation, e.g. `1`, `1995 XA45`, `2040 P-L`
    pub id: String,

    /// Absolute magnitude H
    pub absolute_magnitude: f64,

    /// Slope parameter G
    pub slope: f64,

    /// Epoch of osculation (TT, 0h)
    pub epoch: NaiveDate,

    /// Mean anomaly at the epoch, degrees
    pub mean_anomaly_epoch: f64,

    /// Argument of perihelion, J2000.0, degrees
    pub argument_of_perihelion: f64,

    /// Longitude of the ascending node, J2000.0, degrees
    pub longitude_of_ascending_node: f64,

    /// Inclination to the ecliptic, J2000.0, degrees
    pub inclination_to_ecliptic: f64,

    /// Orbital eccentricity
    pub orbital_eccentricity: f64,

    /// Mean daily motion, degrees per day
    pub mean_daily_motion: f64,

    /// Semimajor axis, AU
    pub semimajor_axis: f64,

    /// Uncertainty parameter U (single character, may be blank)
    pub uncertainty_parameter: String,

    /// Reference for the orbit
    pub reference: String,

    /// Number of observations used
    pub number_of_observations: i64,

    /// Number of oppositions observed
    pub number_of_oppositions: i64,

    /// First/last years observed, or arc length
    pub observation_span: ObservationSpan,

    /// RMS residual, arcseconds
    pub rms_residual: f64,

    /// Coarse indicator of perturbers
    pub coarse_indicator_of_perturbers: String,

    /// Precise indicator of perturbers
    pub precise_indicator_of_perturbers: String,

    /// Computer name
    pub computer_name: String,

    /// 4-hexdigit flags
    pub hex_digit_flags: i64,

    /// Readable designation, e.g. `(1) Ceres`
    pub readable_designation: String,

    /// Date of last observation included in the orbit solution
    pub date_of_last_observation: NaiveDate,
}

impl MinorPlanet {
    /// Year of first observation, 0 for single-opposition orbits
    pub fn year_of_first_observation(&self) -> i64 {
        match self.observation_span {
            ObservationSpan::Years { first, .. } => first,
            ObservationSpan::Arc { .. } => 0,
        }
    }

    /// Year of last observation, 0 for single-opposition orbits
    pub fn year_of_last_observation(&self) -> i64 {
        match self.observation_span {
            ObservationSpan::Years { last, .. } => last,
            ObservationSpan::Arc { .. } => 0,
        }
    }

    /// Arc length in days, 0 for multi-opposition orbits
    pub fn arc_length(&self) -> i64 {
        match self.observation_span {
            ObservationSpan::Arc { days } => days,
            ObservationSpan::Years { .. } => 0,
        }
    }
}
