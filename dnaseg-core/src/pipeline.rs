//! One pipeline per chart mode
//!
//! Each pipeline reads a single input table and returns the derived data the
//! chart is drawn from. Errors carry the table's path; deciding whether a
//! failure is worth more than a log line is left to the caller.

use std::path::Path;

use crate::align::{align, AlignmentStrategy};
use crate::error::{AnalysisError, Result};
use crate::gc;
use crate::io::fasta::SequenceSet;
use crate::io::table::{read_isochores, read_segments};
use crate::isochore::{IsochoreParams, IsochoreSeriesBuilder, IsochoreViews};
use crate::scatter::{group_by_word, ScatterGroup};
use crate::types::{SegmentRow, SeriesPoint, WordCount};
use crate::words;

pub use crate::io::table::write_block_table;

/// Ranked `Best Word` counts of one segments table; blank cells are not words
pub fn word_frequency<P: AsRef<Path>>(path: P, threshold: usize) -> Result<Vec<WordCount>> {
    let path = path.as_ref();
    let rows = read_segments(path)?;

    words::aggregate(rows.iter().filter_map(SegmentRow::word), threshold).ok_or_else(|| {
        AnalysisError::empty(path, format!("no word occurs at least {} times", threshold))
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct GcSkewReport {
    pub strategy: AlignmentStrategy,
    /// `(start, skew)` for every row, including rows without a sequence
    pub points: Vec<SeriesPoint>,
}

/// GC skew of every row of a segments table.
///
/// The table is read as a full segments table, so `Length` and `Best Word`
/// must be present even though only `Start` is used.
///
/// `sequences` is `None` when the sequence file could not be loaded, which
/// yields [`AnalysisError::NoSequenceData`] just like a failed alignment.
pub fn gc_skew<P: AsRef<Path>>(path: P, sequences: Option<&SequenceSet>) -> Result<GcSkewReport> {
    let path = path.as_ref();
    let rows = read_segments(path)?;
    let sequences = sequences.ok_or_else(|| AnalysisError::no_sequence_data(path))?;

    let aligned = align(&rows, sequences).map_err(|_| AnalysisError::no_sequence_data(path))?;
    let points = aligned
        .rows
        .iter()
        .map(|row| SeriesPoint::new(row.segment.start, gc::gc_skew(&row.sequence)))
        .collect();

    Ok(GcSkewReport { strategy: aligned.strategy, points })
}

/// All isochore views of one isochore table
pub fn isochore<P: AsRef<Path>>(path: P, params: &IsochoreParams) -> Result<IsochoreViews> {
    let path = path.as_ref();
    let builder = IsochoreSeriesBuilder::new(params.clone())?;
    let rows = read_isochores(path)?;
    if rows.is_empty() {
        return Err(AnalysisError::empty(path, "isochore table has no rows"));
    }
    Ok(builder.build(&rows))
}

/// `(Start, Length)` points of one segments table grouped by best word
pub fn scatter<P: AsRef<Path>>(path: P) -> Result<Vec<ScatterGroup>> {
    let path = path.as_ref();
    let rows = read_segments(path)?;
    if rows.is_empty() {
        return Err(AnalysisError::empty(path, "segments table has no rows"));
    }
    let groups = group_by_word(&rows);
    if groups.is_empty() {
        return Err(AnalysisError::empty(path, "no row has a best word"));
    }
    Ok(groups)
}
