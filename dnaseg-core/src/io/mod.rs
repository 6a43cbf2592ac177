//! File readers and writers
//!
//! Segment and isochore tables are CSV with a header row; sequence files use
//! the `>header` / sequence-lines layout. The block-averaged isochore table
//! is the only derived data written back to disk.

pub mod fasta;
pub mod table;

pub use fasta::{SequenceRecord, SequenceSet};
pub use table::{read_isochores, read_segments, write_block_table};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use flate2::read::MultiGzDecoder;

use crate::error::{AnalysisError, Result};

/// Open a text file for buffered reading, gunzipping `.gz` files
pub(crate) fn open_text<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    let is_gz = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    if is_gz {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
