//! CSV export of (filtered) tables.

use std::io::Write;

use csv::Writer;
use tracing::debug;

use super::StorageError;
use crate::models::SubmissionTable;

/// Write a table as UTF-8 CSV: the header row, then each row's raw values
/// in their original column order. An empty table yields a header-only file.
pub fn write_csv<W: Write>(table: &SubmissionTable, writer: W) -> Result<(), StorageError> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(table.headers())?;
    for row in table {
        wtr.write_record(&row.values)?;
    }
    wtr.flush()?;

    debug!("Exported {} rows", table.len());
    Ok(())
}

/// Render a table to an in-memory CSV payload.
pub fn to_csv_bytes(table: &SubmissionTable) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(buf)
}
