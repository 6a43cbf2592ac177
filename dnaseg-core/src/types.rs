//! Rows read from the input tables and the derived points built from them

use serde::{Deserialize, Serialize};

pub type GenomicPos = u64;

/// One row of a `segments_output_*` / `merged_segments_output_*` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRow {
    #[serde(rename = "Start")]
    pub start: GenomicPos,
    #[serde(rename = "Length")]
    pub length: u64,
    #[serde(rename = "Best Word")]
    pub best_word: String,
}

impl SegmentRow {
    pub fn new<S: Into<String>>(start: GenomicPos, length: u64, best_word: S) -> Self {
        Self {
            start,
            length,
            best_word: best_word.into(),
        }
    }

    /// Trimmed best word; `None` for a blank cell
    pub fn word(&self) -> Option<&str> {
        let word = self.best_word.trim();
        (!word.is_empty()).then_some(word)
    }
}

/// One window of an `isochores_output_*` table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsochoreRow {
    #[serde(rename = "Start")]
    pub start: GenomicPos,
    /// GC content in percent (0-100)
    #[serde(rename = "GC_Content")]
    pub gc_content: f64,
}

impl IsochoreRow {
    pub fn new(start: GenomicPos, gc_content: f64) -> Self {
        Self { start, gc_content }
    }
}

/// A `(position, value)` pair of a derived series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub position: GenomicPos,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(position: GenomicPos, value: f64) -> Self {
        Self { position, value }
    }
}

impl From<&IsochoreRow> for SeriesPoint {
    fn from(row: &IsochoreRow) -> Self {
        Self::new(row.start, row.gc_content)
    }
}

/// Mean of one block of a block-averaged series.
///
/// `start` is the position of the first element of the block and `end` the
/// position of its last element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockPoint {
    #[serde(rename = "Start")]
    pub start: GenomicPos,
    #[serde(rename = "End")]
    pub end: GenomicPos,
    #[serde(rename = "GC_Content")]
    pub value: f64,
}

impl BlockPoint {
    pub fn point(&self) -> SeriesPoint {
        SeriesPoint::new(self.start, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl WordCount {
    pub fn new<S: Into<String>>(word: S, count: usize) -> Self {
        Self { word: word.into(), count }
    }
}
