//! MPCORB Processor Library
//!
//! A Rust library for decoding Minor Planet Center MPCORB orbital-element
//! catalogs into typed records.
//!
//! This library provides tools for:
//! - Decoding fixed-column MPCORB records, including packed designations and epochs
//! - Reading plain or gzip-compressed catalogs, skipping header and separator lines
//! - Decoding large catalogs in parallel batches
//! - Reporting per-file parse statistics and decode failures

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod mpcorb_parser;
    }
    pub mod adapters {
        pub mod filesystem;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{MinorPlanet, ObservationSpan};
pub use app::services::mpcorb_parser::{
    DecodeError, Designation, MpcOrbParser, ParseResult, ParseStats, ParserOptions,
    decode_record,
};
pub use config::Config;

/// Result type alias for the MPCORB processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for MPCORB processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// A record line could not be decoded
    #[error("Decode error at line {line_number}: {source}")]
    Decode {
        line_number: usize,
        #[source]
        source: DecodeError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Config file could not be parsed
    #[error("Config file error: {message}")]
    ConfigParsing {
        message: String,
        #[source]
        source: toml::de::Error,
    },

    /// Output serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// CSV output failed
    #[error("CSV error: {message}")]
    Csv {
        message: String,
        #[source]
        source: csv::Error,
    },

    /// A background decode task failed
    #[error("Worker task failed: {message}")]
    TaskFailed { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },

    /// Catalog validation found records that did not decode
    #[error("Validation failed: {failed} of {total} records did not decode")]
    ValidationFailed { failed: usize, total: usize },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a decode error for a numbered input line
    pub fn decode(line_number: usize, source: DecodeError) -> Self {
        Self::Decode {
            line_number,
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a config file parsing error
    pub fn config_parsing(message: impl Into<String>, source: toml::de::Error) -> Self {
        Self::ConfigParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV output error
    pub fn csv(message: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            message: message.into(),
            source,
        }
    }

    /// Create a worker task failure
    pub fn task_failed(message: impl Into<String>) -> Self {
        Self::TaskFailed {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Create a validation failure
    pub fn validation_failed(failed: usize, total: usize) -> Self {
        Self::ValidationFailed { failed, total }
    }

    /// The decode failure behind this error, if any
    pub fn as_decode_error(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::ConfigParsing {
            message: "TOML parsing failed".to_string(),
            source: error,
        }
    }
}
