//! Sequence file reader
//!
//! Reads the `>header` / sequence-lines layout into an ordered set of
//! records. Wrapped sequence lines are concatenated in file order and the
//! case of every base is kept as written.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::error::{AnalysisError, Result};
use super::open_text;

const HEADER_MARKER: char = '>';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    /// Header line without the leading `>`
    pub id: String,
    pub sequence: String,
}

/// Sequence records in file order, with lookup by identifier
#[derive(Debug, Clone, Default)]
pub struct SequenceSet {
    records: Vec<SequenceRecord>,
    index: HashMap<String, usize>,
}

impl SequenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a sequence file (optionally gzipped).
    ///
    /// A missing file is reported as [`AnalysisError::NotFound`]; text that
    /// is not valid UTF-8 as [`AnalysisError::MalformedInput`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading sequence data from {}", path.display());

        let reader = open_text(path)?;
        let set = Self::parse_reader(reader).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => AnalysisError::malformed(path, e.to_string()),
            _ => AnalysisError::io(path, e),
        })?;

        log::info!("Loaded {} sequences from {}", set.len(), path.display());
        Ok(set)
    }

    /// Parse records from any buffered reader.
    ///
    /// Lines before the first header have no identifier and are dropped.
    pub fn parse_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut set = Self::new();
        let mut current_id: Option<String> = None;
        let mut current_seq = String::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if let Some(header) = line.strip_prefix(HEADER_MARKER) {
                if let Some(id) = current_id.take() {
                    set.insert(id, std::mem::take(&mut current_seq));
                }
                current_id = Some(header.trim().to_string());
            } else if !line.is_empty() {
                if current_id.is_some() {
                    current_seq.push_str(line);
                } else {
                    log::debug!("Dropping sequence line before first header");
                }
            }
        }

        // No trailing header flushes the last record
        if let Some(id) = current_id {
            set.insert(id, current_seq);
        }

        Ok(set)
    }

    /// Insert a record; a repeated identifier overwrites the earlier
    /// sequence but keeps its original position.
    pub fn insert(&mut self, id: String, sequence: String) {
        match self.index.get(&id) {
            Some(&idx) => {
                log::warn!("Duplicate sequence identifier '{}', keeping the later sequence", id);
                self.records[idx].sequence = sequence;
            }
            None => {
                self.index.insert(id.clone(), self.records.len());
                self.records.push(SequenceRecord { id, sequence });
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&SequenceRecord> {
        self.index.get(id).and_then(|&idx| self.records.get(idx))
    }

    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequenceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(String, String)> for SequenceSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (id, sequence) in iter {
            set.insert(id, sequence);
        }
        set
    }
}
