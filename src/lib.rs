//! Tidal Processor Library
//!
//! A Rust library for analyzing UK tide gauge observation records.
//!
//! This library provides tools for:
//! - Parsing tide gauge station files with proper header/data handling
//! - Flagging disqualified readings (M/N/T sentinel suffixes) as missing
//! - Merging per-file series into one time-sorted, deduplicated record
//! - Estimating the long-term sea-level trend with a significance test
//! - Harmonic analysis of named tidal constituents (M2, S2, ...)
//! - Locating the longest contiguous run of valid observations

pub mod analysis;
pub mod combine;
pub mod constants;
pub mod parser;
pub mod series;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use analysis::{
    extract_and_demean, harmonic_analysis, longest_run, lookup_constituent, sea_level_trend,
    Constituent, ConstituentFit, HarmonicResult, LongestRun, TrendResult, CONSTITUENTS,
};
pub use combine::combine;
pub use parser::{parse_station_file, parse_station_text};
pub use series::{Interval, Reading, Series};

/// Result type alias for the tidal processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for tide gauge processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed record in a station file
    #[error("parse error in '{file}' line {line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    /// An interval selected no usable readings, so no statistic is defined
    #[error("empty range: no valid readings between {start} and {end}")]
    EmptyRange { start: String, end: String },

    /// Too few valid readings for a statistical fit
    #[error("insufficient data for {operation}: need {needed} valid readings, have {available}")]
    InsufficientData {
        operation: String,
        needed: usize,
        available: usize,
    },

    /// Tidal constituent name not in the frequency table
    #[error("unknown tidal constituent: '{name}'")]
    UnknownConstituent { name: String },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Invalid file glob pattern
    #[error("file pattern error: {message}")]
    Pattern {
        message: String,
        #[source]
        source: glob::PatternError,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a parse error with file and line context
    pub fn parse(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an empty range error
    pub fn empty_range(start: impl ToString, end: impl ToString) -> Self {
        Self::EmptyRange {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Create an insufficient data error
    pub fn insufficient_data(
        operation: impl Into<String>,
        needed: usize,
        available: usize,
    ) -> Self {
        Self::InsufficientData {
            operation: operation.into(),
            needed,
            available,
        }
    }

    /// Create an unknown constituent error
    pub fn unknown_constituent(name: impl Into<String>) -> Self {
        Self::UnknownConstituent { name: name.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
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

impl From<glob::PatternError> for Error {
    fn from(error: glob::PatternError) -> Self {
        Self::Pattern {
            message: "invalid file pattern".to_string(),
            source: error,
        }
    }
}
