//! Application constants for MPCORB processor
//!
//! This module contains the record layout constants, default values,
//! and file conventions used throughout the MPCORB processor.

// =============================================================================
// Record Layout
// =============================================================================

/// Length of an MPCORB orbital-elements record, excluding the line terminator
pub const RECORD_LEN: usize = 202;

/// Longest line still treated as a record (tolerates one trailing pad/`\r` byte)
pub const MAX_RECORD_LEN: usize = RECORD_LEN + 1;

/// Strict calendar format of the date-of-last-observation column
pub const MPC_DATE_FORMAT: &str = "%Y%m%d";

/// Month/day marker for an unknown date of last observation
pub const UNKNOWN_MONTH_DAY: &str = "0000";

/// Month/day substituted when the date of last observation is `YYYY0000`
pub const UNKNOWN_MONTH_DAY_SUBSTITUTE: &str = "0101";

/// Oppositions above this count store first/last observation years instead of an arc length
pub const SINGLE_OPPOSITION_LIMIT: i64 = 1;

// =============================================================================
// Packed Encoding
// =============================================================================

/// Value of the first lowercase packed digit (`'a'`)
pub const PACKED_LOWERCASE_OFFSET: i64 = 36;

/// Value of the first uppercase packed digit (`'A'`)
pub const PACKED_UPPERCASE_OFFSET: i64 = 10;

/// Largest value a single packed digit can carry (`'z'`)
pub const PACKED_DIGIT_MAX: i64 = 61;

/// Letter separating the survey code from the sequence number in a packed survey designation
pub const SURVEY_MARKER: char = 'S';

// =============================================================================
// Input Files
// =============================================================================

/// Leading bytes of a gzip stream
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Extension of catalogs expected to hold gzip content
pub const GZIP_EXTENSION: &str = "gz";

// =============================================================================
// Processing Defaults
// =============================================================================

/// Number of candidate lines decoded per parallel batch
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Upper bound on decode workers
pub const MAX_PARALLEL_WORKERS: usize = 256;

/// Number of decode error messages retained in parse statistics
pub const DEFAULT_MAX_RECORDED_ERRORS: usize = 100;

/// Success rate (percent) above which a parse counts as successful
pub const SUCCESS_RATE_THRESHOLD: f64 = 90.0;

// =============================================================================
// Configuration
// =============================================================================

/// Directory under the user config dir holding our config file
pub const CONFIG_DIR_NAME: &str = "mpcorb-processor";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment overrides
pub mod env_vars {
    pub const WORKERS: &str = "MPCORB_WORKERS";
    pub const BATCH_SIZE: &str = "MPCORB_BATCH_SIZE";
    pub const STRICT: &str = "MPCORB_STRICT";
}

/// Log target used to build the default tracing filter
pub const LOG_TARGET: &str = "mpcorb_processor";
