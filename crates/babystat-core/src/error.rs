use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by BabyStat.
#[derive(Error, Debug)]
pub enum BabyStatError {
    /// The export file could not be opened or read from disk.
    #[error("Failed to read export {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV row or header could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required export column is absent from the header row.
    #[error("Export is missing required column \"{0}\"")]
    MissingColumn(String),

    /// A timestamp string did not match any recognised export format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// The export parsed cleanly but contained zero event rows.
    #[error("Export contains no records")]
    EmptyExport,

    /// A record's date falls outside the sane range accepted by the
    /// transformer.
    #[error("Record dated {date} is outside the accepted range {min}..{max}")]
    DateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    /// No export file was given and none could be discovered.
    #[error("No CSV export found in {0}")]
    NoExportFiles(PathBuf),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the BabyStat crates.
pub type Result<T> = std::result::Result<T, BabyStatError>;
