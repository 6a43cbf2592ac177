//! Input file discovery and output naming
//!
//! Tables are recognised by file-name prefix, so `merged_segments_output_*`
//! is never picked up as a plain segments table.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};

const CSV_SUFFIXES: [&str; 2] = [".csv.gz", ".csv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Segments,
    MergedSegments,
    Isochores,
}

impl TableKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            TableKind::Segments => "segments_output_",
            TableKind::MergedSegments => "merged_segments_output_",
            TableKind::Isochores => "isochores_output_",
        }
    }

    fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(self.prefix()) && strip_csv_suffix(file_name).is_some()
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Segments => "segments",
            TableKind::MergedSegments => "merged segments",
            TableKind::Isochores => "isochores",
        };
        f.write_str(name)
    }
}

/// A discovered input table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub kind: TableKind,
}

impl InputFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name without the `.csv` (or `.csv.gz`) suffix
    pub fn stem(&self) -> String {
        let name = self.file_name();
        strip_csv_suffix(&name).unwrap_or(&name).to_string()
    }

    /// `<out_dir>/<stem>_<suffix>.<ext>`
    pub fn output_path(&self, out_dir: &Path, suffix: &str, ext: &str) -> PathBuf {
        out_dir.join(format!("{}_{}.{}", self.stem(), suffix, ext))
    }
}

fn strip_csv_suffix(name: &str) -> Option<&str> {
    CSV_SUFFIXES.iter().find_map(|suffix| name.strip_suffix(suffix))
}

/// Segment and merged-segment tables in `dir`, sorted by file name
pub fn segment_files<P: AsRef<Path>>(dir: P) -> Result<Vec<InputFile>> {
    scan(dir.as_ref(), &[TableKind::Segments, TableKind::MergedSegments])
}

/// Isochore tables in `dir`, sorted by file name
pub fn isochore_files<P: AsRef<Path>>(dir: P) -> Result<Vec<InputFile>> {
    scan(dir.as_ref(), &[TableKind::Isochores])
}

/// Regular files in `dir` whose name matches one of `kinds`
pub fn scan(dir: &Path, kinds: &[TableKind]) -> Result<Vec<InputFile>> {
    if !dir.is_dir() {
        return Err(AnalysisError::not_found(dir));
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| AnalysisError::io(dir, e))? {
        let entry = entry.map_err(|e| AnalysisError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(kind) = kinds.iter().find(|k| k.matches(&name)) {
            found.push(InputFile { path, kind: *kind });
        }
    }

    found.sort_by_key(|f| f.file_name());
    log::debug!("Found {} input tables in {}", found.len(), dir.display());
    Ok(found)
}
