//! MPCORB parser for Minor Planet Center orbital-element catalogs
//!
//! This module decodes the fixed-column MPCORB export format into
//! [`MinorPlanet`](crate::app::models::MinorPlanet) records. Every decode is a
//! pure function of one input line, so records can be decoded on any number
//! of threads without coordination.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`columns`] - Byte ranges and decode policy for every column
//! - [`field_parsers`] - Column slicing, scalar and plain-date parsing
//! - [`packed`] - Base-62 packed integers and packed epochs
//! - [`designation`] - Numbered / provisional / survey designation decoding
//! - [`record_parser`] - Assembly of one record from one line
//! - [`parser`] - Line source and file-level orchestration
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use mpcorb_processor::app::services::mpcorb_parser::decode_record;
//!
//! let line = "00001    3.34  0.12 K13B4  10.55761   72.29213   80.32762   10.59398  0.0757973  0.21415869   2.7668073  0 MPO286777  6502 105 1802-2014 0.82 M-v 30h MPCLINUX   0000      (1) Ceres              20140307";
//! let ceres = decode_record(line).unwrap();
//!
//! assert_eq!(ceres.id, "1");
//! assert_eq!(ceres.readable_designation, "(1) Ceres");
//! assert_eq!(ceres.year_of_first_observation(), 1802);
//! ```

pub mod columns;
pub mod designation;
pub mod error;
pub mod field_parsers;
pub mod packed;
pub mod parser;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use columns::{Field, FieldPolicy};
pub use designation::{Designation, resolve_packed_designation};
pub use error::{DecodeError, ScalarError};
pub use packed::{decode_packed_date, decode_packed_int};
pub use parser::{CandidateLine, Entries, MpcOrbParser, ParserOptions, RecordLines};
pub use record_parser::decode_record;
pub use stats::{ParseResult, ParseStats};
