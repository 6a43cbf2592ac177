//! CSV table readers and the block-average TSV writer
//!
//! Tables are read into typed rows up front, so a missing column or an
//! unparsable cell is reported once as `MalformedInput` instead of failing
//! somewhere downstream.

use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::de::DeserializeOwned;

use crate::error::{AnalysisError, Result};
use crate::types::{BlockPoint, IsochoreRow, SegmentRow};
use super::open_text;

pub const SEGMENT_COLUMNS: [&str; 3] = ["Start", "Length", "Best Word"];
pub const ISOCHORE_COLUMNS: [&str; 2] = ["Start", "GC_Content"];
pub const BLOCK_TABLE_COLUMNS: [&str; 3] = ["Start", "End", "GC_Content"];

/// Read a segments / merged-segments table
pub fn read_segments<P: AsRef<Path>>(path: P) -> Result<Vec<SegmentRow>> {
    let path = path.as_ref();
    let rows = read_table(path, open_text(path)?, &SEGMENT_COLUMNS)?;
    log::debug!("Read {} segment rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read an isochore table; rows stay in file order
pub fn read_isochores<P: AsRef<Path>>(path: P) -> Result<Vec<IsochoreRow>> {
    let path = path.as_ref();
    let rows: Vec<IsochoreRow> = read_table(path, open_text(path)?, &ISOCHORE_COLUMNS)?;

    if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| !r.gc_content.is_finite()) {
        return Err(AnalysisError::malformed(
            path,
            format!("row {}: GC_Content is not a finite number ({})", idx + 1, row.gc_content),
        ));
    }

    log::debug!("Read {} isochore rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Deserialize every row of a CSV table after checking its header.
///
/// `path` is only used for error messages.
pub fn read_table<T, R>(path: &Path, reader: R, required: &[&str]) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| csv_read_error(path, e))?
        .clone();
    log::debug!("Columns in {}: {:?}", path.display(), headers.iter().collect::<Vec<_>>());

    if let Some(missing) = required.iter().find(|col| !headers.iter().any(|h| h == **col)) {
        return Err(AnalysisError::malformed(
            path,
            format!("missing required column '{}'", missing),
        ));
    }

    let mut rows = Vec::new();
    for (idx, record) in csv_reader.deserialize::<T>().enumerate() {
        // Row numbers are 1-based and exclude the header line
        let row = record.map_err(|e| match e.kind() {
            csv::ErrorKind::Io(_) => csv_read_error(path, e),
            _ => AnalysisError::malformed(path, format!("row {}: {}", idx + 1, e)),
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Write the block-averaged isochore series as a tab-separated table with
/// the columns `Start`, `End`, `GC_Content` in that order.
pub fn write_block_table<P: AsRef<Path>>(path: P, blocks: &[BlockPoint]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| AnalysisError::io(path, e))?;
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(file);

    writer
        .write_record(BLOCK_TABLE_COLUMNS)
        .map_err(|e| csv_write_error(path, e))?;
    for block in blocks {
        writer.serialize(block).map_err(|e| csv_write_error(path, e))?;
    }
    writer.flush().map_err(|e| AnalysisError::io(path, e))?;

    log::debug!("Wrote {} blocks to {}", blocks.len(), path.display());
    Ok(())
}

fn csv_read_error(path: &Path, err: csv::Error) -> AnalysisError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(io_err) => AnalysisError::io(path, io_err),
            other => AnalysisError::malformed(path, format!("{:?}", other)),
        }
    } else {
        AnalysisError::malformed(path, err.to_string())
    }
}

fn csv_write_error(path: &Path, err: csv::Error) -> AnalysisError {
    match err.into_kind() {
        csv::ErrorKind::Io(io_err) => AnalysisError::io(path, io_err),
        other => AnalysisError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, format!("{:?}", other)),
        },
    }
}
