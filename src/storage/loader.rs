//! CSV loading with schema validation.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use super::StorageError;
use crate::models::{Column, SubmissionRow, SubmissionTable};

/// Positions of the required columns within a header.
#[derive(Debug, Clone)]
struct ColumnIndex {
    positions: [usize; Column::COUNT],
}

impl ColumnIndex {
    /// Resolve every required column against a trimmed header, naming all
    /// missing columns at once.
    fn resolve(headers: &[String]) -> Result<Self, StorageError> {
        let mut positions = [0usize; Column::COUNT];
        let mut missing = Vec::new();

        for (slot, column) in Column::REQUIRED.iter().enumerate() {
            let mut found = headers
                .iter()
                .enumerate()
                .filter(|(_, h)| h.as_str() == column.header())
                .map(|(i, _)| i);

            match (found.next(), found.next()) {
                (Some(i), None) => positions[slot] = i,
                (Some(_), Some(_)) => {
                    return Err(StorageError::DuplicateColumn(column.header().to_string()))
                }
                (None, _) => missing.push(column.header().to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(StorageError::MissingColumns(missing));
        }

        Ok(Self { positions })
    }

    fn get<'r>(&self, record: &'r StringRecord, column: Column) -> &'r str {
        // REQUIRED lists the variants in declaration order
        record.get(self.positions[column as usize]).unwrap_or_default()
    }

    fn number(&self, record: &StringRecord, column: Column, line: u64) -> Result<f64, StorageError> {
        let raw = self.get(record, column);
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(StorageError::InvalidNumber {
                line,
                column: column.header().to_string(),
                value: raw.to_string(),
            }),
        }
    }

    fn row(&self, record: &StringRecord, line: u64) -> Result<SubmissionRow, StorageError> {
        Ok(SubmissionRow {
            problem: self.get(record, Column::Problem).to_string(),
            user_id: self.get(record, Column::UserId).to_string(),
            submission_id: self.get(record, Column::SubmissionId).to_string(),
            language: self.get(record, Column::Language).to_string(),
            time: self.number(record, Column::Time, line)?,
            result: self.get(record, Column::Result).to_string(),
            score: self.number(record, Column::Score, line)?,
            status: self.get(record, Column::Status).to_string(),
            during_contest: self.get(record, Column::DuringContest).to_string(),
            values: record.iter().map(str::to_string).collect(),
        })
    }
}

/// Parse a submission log.
///
/// Header names are trimmed; extra columns are kept and passed through to
/// exports. Ragged rows, missing required columns and unparsable
/// `Time`/`Score` values are rejected. A header-only file parses to an empty
/// table, so filtered exports can always be read back.
pub fn load_csv<R: Read>(reader: R) -> Result<SubmissionTable, StorageError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let index = ColumnIndex::resolve(&headers)?;
    debug!("Resolved {} columns ({} required)", headers.len(), Column::COUNT);

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(i as u64 + 2);
        rows.push(index.row(&record, line)?);
    }

    info!("Loaded {} submissions", rows.len());
    Ok(SubmissionTable::new(headers, rows))
}

/// Reject a table with no submissions. Applied where a log becomes the
/// subject of analysis (uploads, reports), not to every parse.
pub fn require_submissions(table: SubmissionTable) -> Result<SubmissionTable, StorageError> {
    if table.is_empty() {
        return Err(StorageError::EmptyTable);
    }
    Ok(table)
}

/// Load a submission log from disk.
pub fn load_csv_path(path: &Path) -> Result<SubmissionTable, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    info!("Reading submission log {:?}", path);
    load_csv(BufReader::new(file))
}
