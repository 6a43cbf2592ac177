//! DNA Segment Analyzer core library
//!
//! Readers for segment, isochore and sequence files, the derived series the
//! charts are drawn from, and one pipeline per chart mode.

pub mod types;
pub mod error;
pub mod io;
pub mod gc;
pub mod align;
pub mod words;
pub mod isochore;
pub mod scatter;
pub mod discover;
pub mod pipeline;

// Re-export commonly used types and functions
pub use types::{SegmentRow, IsochoreRow, SeriesPoint, BlockPoint, WordCount};
pub use error::{AnalysisError, Result};
pub use io::fasta::{SequenceRecord, SequenceSet};
pub use align::{align, AlignedRow, AlignedRows, AlignmentKey, AlignmentStrategy};
pub use gc::{gc_skew, block_average, moving_average};
pub use words::aggregate;
pub use isochore::{
    IsochoreBoundaries, IsochoreClass, IsochoreParams, IsochoreSeriesBuilder, IsochoreViews,
    Histogram, histogram, to_megabases,
};
pub use scatter::{group_by_word, ScatterGroup};
pub use discover::{InputFile, TableKind};

/// Version information for the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
