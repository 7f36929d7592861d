//! Submission log ingestion and export.
//!
//! Handles moving tables across the CSV boundary:
//! - Loading an uploaded log into a validated `SubmissionTable`
//! - Writing a (filtered) table back out as CSV

mod export;
mod loader;

pub use export::{to_csv_bytes, write_csv};
pub use loader::{load_csv, load_csv_path, require_submissions};

use std::path::PathBuf;
use thiserror::Error;

/// File name offered for filtered downloads.
pub const EXPORT_FILENAME: &str = "filtered_contest_data.csv";

/// Example header and row shown while no file has been loaded.
pub const EXPECTED_FORMAT: &str = "\
Problem,Team/User ID,Submission ID,Language,Time,Result,Score,Status,During Contest
The Power Sum,user123,1234567,java15,1000,Accepted,20,Yes,Yes
";

/// Errors that can occur while loading or exporting a submission log.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("Line {line}: column '{column}' expects a number, got '{value}'")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },

    #[error("The file contains no submissions")]
    EmptyTable,

    #[error("File not found: {0}")]
    PathNotFound(PathBuf),
}
