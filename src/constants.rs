//! Application constants for the tidal processor
//!
//! File-format constants for UK tide gauge station files and the
//! default analysis configuration.

// =============================================================================
// Station File Format
// =============================================================================

/// Number of header/metadata lines at the top of each station file
pub const HEADER_LINE_COUNT: usize = 11;

/// Whitespace-delimited fields per data line: Cycle, Date, Time, Value, Residual
pub const FIELD_COUNT: usize = 5;

/// Trailing one-letter flags that disqualify a reading
///
/// M = missing, N = null, T = tidal prediction substituted. A value
/// carrying any of these is treated as missing regardless of its
/// numeric prefix.
pub const SENTINEL_FLAGS: &[char] = &['M', 'N', 'T'];

/// Date format in station files (e.g. 1947/01/01)
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Time format in station files (e.g. 13:00:00)
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Combined date + time format for a data line
pub const DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Observation data file pattern within a station directory
pub const STATION_FILE_PATTERN: &str = "*.txt";

// =============================================================================
// Analysis Defaults
// =============================================================================

/// Constituents fitted when none are requested on the command line
pub const DEFAULT_CONSTITUENTS: &[&str] = &["M2", "S2"];

/// Date format accepted for --start/--end arguments
pub const INTERVAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Seconds per day, for converting elapsed time to trend units
pub const SECONDS_PER_DAY: f64 = 86_400.0;
