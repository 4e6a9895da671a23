//! Command implementation for the tidal processor CLI
//!
//! Orchestrates the analysis workflow: discover station files in the
//! given directory, parse each one (skipping unreadable files with a
//! warning), combine the records into a single series and run the three
//! analyses over it.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use colored::Colorize;
use tracing::{debug, info, warn};

use crate::analysis::{
    extract_and_demean, harmonic_analysis, longest_run, sea_level_trend, HarmonicResult,
    LongestRun, TrendResult,
};
use crate::cli::args::Args;
use crate::combine::combine;
use crate::constants::STATION_FILE_PATTERN;
use crate::parser::parse_station_file;
use crate::series::{Interval, Series};
use crate::{Error, Result};

/// Everything the analysis produced for one station directory
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Station name (the input directory name)
    pub station: String,
    /// Number of files parsed into the combined series
    pub files_processed: usize,
    /// Number of files skipped due to read or parse failures
    pub files_skipped: usize,
    /// Total readings in the combined series, gaps included
    pub total_readings: usize,
    /// Readings carrying a usable sea level value
    pub valid_readings: usize,
    /// First and last timestamp of the combined series
    pub coverage: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Long-term sea-level trend
    pub trend: TrendResult,
    /// Fitted constituent amplitudes and phases
    pub harmonics: HarmonicResult,
    /// Longest unbroken run of valid readings, with its timestamps
    pub longest_run: Option<RunReport>,
}

/// A contiguous run located in the combined series
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    pub run: LongestRun,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Run the full analysis pipeline for a station directory.
pub fn run(args: &Args) -> Result<AnalysisReport> {
    setup_logging(args);

    info!("starting tidal processor");
    debug!("command line arguments: {:?}", args);

    args.validate()?;

    let files = discover_station_files(args)?;
    info!(files = files.len(), "discovered station files");

    // A bad file is skipped here, at the caller level; the parser itself
    // never swallows errors.
    let mut series_list = Vec::new();
    let mut files_skipped = 0usize;
    for path in &files {
        match parse_station_file(path) {
            Ok(series) => {
                debug!(file = %path.display(), readings = series.len(), "parsed");
                series_list.push(series);
            }
            Err(error) => {
                warn!(file = %path.display(), %error, "skipping station file");
                files_skipped += 1;
            }
        }
    }

    if series_list.is_empty() {
        return Err(Error::configuration(format!(
            "no parseable station files in {}",
            args.directory.display()
        )));
    }
    let files_processed = series_list.len();

    let combined = combine(series_list);
    info!(
        readings = combined.len(),
        valid = combined.present_count(),
        "combined station series"
    );

    let trend = sea_level_trend(&combined)?;

    let window = match args.get_window()? {
        Some(interval) => interval,
        None => full_coverage_interval(&combined)?,
    };
    let demeaned = extract_and_demean(&combined, window)?;
    let reference = demeaned
        .first_present_timestamp()
        .ok_or_else(|| Error::empty_range(window.start, window.end))?;
    let harmonics = harmonic_analysis(&demeaned, &args.get_constituents(), reference)?;

    let longest = longest_run(&combined).map(|run| RunReport {
        run,
        start_time: combined.readings()[run.start].timestamp,
        end_time: combined.readings()[run.end].timestamp,
    });

    let station = args
        .directory
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.directory.display().to_string());

    Ok(AnalysisReport {
        station,
        files_processed,
        files_skipped,
        total_readings: combined.len(),
        valid_readings: combined.present_count(),
        coverage: combined
            .first_timestamp()
            .zip(combined.last_timestamp()),
        trend,
        harmonics,
        longest_run: longest,
    })
}

/// Print the human-readable analysis report to stdout.
pub fn print_report(report: &AnalysisReport) {
    println!();
    println!("{} {}", "Station:".bold(), report.station);
    println!(
        "  {} files processed, {} skipped",
        report.files_processed, report.files_skipped
    );
    println!(
        "  {} readings ({} valid)",
        report.total_readings, report.valid_readings
    );
    if let Some((first, last)) = report.coverage {
        println!("  coverage {} to {}", first, last);
    }

    println!();
    println!("{}", "Sea level rise".bold().cyan());
    println!("  slope:   {:.6e} m/day", report.trend.slope);
    println!("  p-value: {:.4e}", report.trend.p_value);

    println!();
    println!("{}", "Tidal constituents".bold().cyan());
    for fit in &report.harmonics.fits {
        println!(
            "  {}: amplitude {:.4} m, phase {:.4} rad",
            fit.name.green(),
            fit.amplitude,
            fit.phase
        );
    }

    println!();
    println!("{}", "Longest contiguous run".bold().cyan());
    match &report.longest_run {
        Some(run_report) => println!(
            "  {} readings, {} to {}",
            run_report.run.len(),
            run_report.start_time,
            run_report.end_time
        ),
        None => println!("  {}", "no valid readings".yellow()),
    }
}

/// Find the station files to process, in deterministic order.
///
/// Files sort by path so the combiner's first-seen-wins rule does not
/// depend on directory iteration order.
fn discover_station_files(args: &Args) -> Result<Vec<PathBuf>> {
    let pattern = args
        .directory
        .join(STATION_FILE_PATTERN)
        .display()
        .to_string();

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) => files.push(path),
            Err(error) => warn!(%error, "unreadable directory entry"),
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(Error::configuration(format!(
            "no station files matching {} found in {}",
            STATION_FILE_PATTERN,
            args.directory.display()
        )));
    }

    Ok(files)
}

/// Interval spanning the whole combined series.
fn full_coverage_interval(series: &Series) -> Result<Interval> {
    let (start, end) = series
        .first_timestamp()
        .zip(series.last_timestamp())
        .ok_or_else(|| Error::configuration("combined series is empty".to_string()))?;
    Interval::new(start, end)
}

/// Set up structured logging to stderr.
fn setup_logging(args: &Args) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tidal_processor={}", log_level)));

    // try_init so repeated calls (e.g. from tests) are harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("logging initialized at level: {}", log_level);
}
