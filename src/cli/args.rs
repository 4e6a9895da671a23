//! Command-line argument definitions for the tidal processor
//!
//! Defines the CLI using the clap derive API: a station directory plus
//! options controlling the constituent list, the harmonic analysis
//! window and logging verbosity.

use crate::analysis::lookup_constituent;
use crate::constants::{DEFAULT_CONSTITUENTS, INTERVAL_DATE_FORMAT};
use crate::series::Interval;
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the tide gauge analyzer
///
/// Reads every station file in a directory, merges the records into one
/// series and reports the sea-level trend, tidal constituent amplitudes
/// and the longest unbroken run of valid observations.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tidal-processor",
    version,
    about = "Calculate tidal constituents and relative sea level from tide gauge data",
    long_about = "Analyzes a directory of UK tide gauge station files. Records are cleaned \
                  (M/N/T-flagged readings become explicit gaps), concatenated in time order \
                  and analyzed for the long-term sea-level trend, the amplitude and phase of \
                  named tidal constituents, and the longest contiguous stretch of valid data."
)]
pub struct Args {
    /// Directory containing station .txt files
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Tidal constituents to fit (comma-separated list)
    ///
    /// Defaults to M2,S2. Available: M2, S2, N2, K2, K1, O1, P1, Q1.
    #[arg(
        short = 'c',
        long = "constituents",
        value_name = "LIST",
        help = "Comma-separated list of tidal constituents to fit"
    )]
    pub constituents: Option<ConstituentList>,

    /// Start date of the harmonic analysis window (YYYY-MM-DD, inclusive)
    ///
    /// Defaults to the first reading in the combined series. Requires --end.
    #[arg(
        long = "start",
        value_name = "DATE",
        requires = "end",
        help = "Start date of the harmonic analysis window (YYYY-MM-DD)"
    )]
    pub start: Option<String>,

    /// End date of the harmonic analysis window (YYYY-MM-DD, inclusive)
    ///
    /// Defaults to the last reading in the combined series. Requires --start.
    #[arg(
        long = "end",
        value_name = "DATE",
        requires = "start",
        help = "End date of the harmonic analysis window (YYYY-MM-DD)"
    )]
    pub end: Option<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Wrapper for parsing comma-separated constituent lists
#[derive(Debug, Clone)]
pub struct ConstituentList {
    pub names: Vec<String>,
}

impl FromStr for ConstituentList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let names: Vec<String> = s
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();

        if names.is_empty() {
            return Err(Error::configuration(
                "constituent list cannot be empty".to_string(),
            ));
        }

        for (i, name) in names.iter().enumerate() {
            lookup_constituent(name)?;
            if names[..i].contains(name) {
                return Err(Error::configuration(format!(
                    "constituent '{}' listed more than once",
                    name
                )));
            }
        }

        Ok(ConstituentList { names })
    }
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.directory.exists() {
            return Err(Error::configuration(format!(
                "station directory does not exist: {}",
                self.directory.display()
            )));
        }

        if !self.directory.is_dir() {
            return Err(Error::configuration(format!(
                "station path is not a directory: {}",
                self.directory.display()
            )));
        }

        // Surface a bad window before any file is read
        self.get_window()?;

        Ok(())
    }

    /// Get the list of constituents to fit
    pub fn get_constituents(&self) -> Vec<String> {
        match &self.constituents {
            Some(list) => list.names.clone(),
            None => DEFAULT_CONSTITUENTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parse the optional analysis window into an inclusive interval.
    ///
    /// The start date expands to 00:00:00 and the end date to 23:59:59,
    /// so both days are fully covered.
    pub fn get_window(&self) -> Result<Option<Interval>> {
        let (start, end) = match (&self.start, &self.end) {
            (Some(start), Some(end)) => (start, end),
            _ => return Ok(None),
        };

        let start = NaiveDate::parse_from_str(start.trim(), INTERVAL_DATE_FORMAT)
            .map_err(|_| Error::configuration(format!("invalid start date: {}", start)))?
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| Error::configuration("invalid start date time".to_string()))?
            .and_utc();

        let end = NaiveDate::parse_from_str(end.trim(), INTERVAL_DATE_FORMAT)
            .map_err(|_| Error::configuration(format!("invalid end date: {}", end)))?
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| Error::configuration("invalid end date time".to_string()))?
            .and_utc();

        Interval::new(start, end).map(Some)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
